// KAT file format for XTEA vectors (one record per blank-line separated block):
//
//   count = 0
//   rounds = 32
//   key = 000102030405060708090a0b0c0d0e0f
//   pt = 4142434445464748
//   ct = 497df3d072612cb5
//
// Lines starting with '#' are comments.

use core::fmt;

use crate::xtea::{block_from_bytes, key_from_bytes};
use crate::xtea_error::XteaError;
use crate::xtea_params::{BLOCKBYTES, KEYBYTES, KEY_WORDS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KatVector {
    pub count: usize,
    pub rounds: u8,
    pub key: [u32; KEY_WORDS],
    pub pt: u64,
    pub ct: u64,
}

impl fmt::Display for KatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_bytes: Vec<u8> = self.key.iter().flat_map(|k| k.to_be_bytes()).collect();
        writeln!(f, "count = {}", self.count)?;
        writeln!(f, "rounds = {}", self.rounds)?;
        writeln!(f, "key = {}", hex::encode(key_bytes))?;
        writeln!(f, "pt = {}", hex::encode(self.pt.to_be_bytes()))?;
        writeln!(f, "ct = {}", hex::encode(self.ct.to_be_bytes()))
    }
}

fn unhex<const N: usize>(field: &str, s: &str) -> Result<[u8; N], XteaError> {
    let v = hex::decode(s.trim()).map_err(|e| XteaError::InvalidVector(format!("{field}: {e}")))?;
    v.try_into()
        .map_err(|v: Vec<u8>| XteaError::InvalidVector(format!("{field}: expected {N} bytes, got {}", v.len())))
}

#[derive(Default)]
struct Partial {
    count: Option<usize>,
    rounds: Option<u8>,
    key: Option<[u32; KEY_WORDS]>,
    pt: Option<u64>,
    ct: Option<u64>,
}

impl Partial {
    fn is_empty(&self) -> bool {
        self.count.is_none() && self.rounds.is_none() && self.key.is_none() && self.pt.is_none() && self.ct.is_none()
    }

    fn finish(self) -> Result<KatVector, XteaError> {
        let missing = |name: &str| XteaError::InvalidVector(format!("missing field `{name}`"));
        Ok(KatVector {
            count: self.count.ok_or_else(|| missing("count"))?,
            rounds: self.rounds.ok_or_else(|| missing("rounds"))?,
            key: self.key.ok_or_else(|| missing("key"))?,
            pt: self.pt.ok_or_else(|| missing("pt"))?,
            ct: self.ct.ok_or_else(|| missing("ct"))?,
        })
    }
}

pub fn parse_kat(txt: &str) -> Result<Vec<KatVector>, XteaError> {
    let mut out = Vec::new();
    let mut cur = Partial::default();

    for line in txt.lines().map(str::trim).chain(core::iter::once("")) {
        if line.starts_with('#') {
            continue;
        }

        if line.is_empty() {
            // end of one test case
            let done = core::mem::take(&mut cur);
            if !done.is_empty() {
                out.push(done.finish()?);
            }
            continue;
        }

        let (name, value) = line
            .split_once('=')
            .ok_or_else(|| XteaError::InvalidVector(format!("not a `name = value` line: {line}")))?;
        let value = value.trim();

        match name.trim() {
            "count" => {
                cur.count = Some(value.parse().map_err(|_| XteaError::InvalidVector(format!("count: {value}")))?);
            }
            "rounds" => {
                cur.rounds = Some(value.parse().map_err(|_| XteaError::InvalidVector(format!("rounds: {value}")))?);
            }
            "key" => cur.key = Some(key_from_bytes(&unhex::<KEYBYTES>("key", value)?)),
            "pt" => cur.pt = Some(block_from_bytes(&unhex::<BLOCKBYTES>("pt", value)?)),
            "ct" => cur.ct = Some(block_from_bytes(&unhex::<BLOCKBYTES>("ct", value)?)),
            other => return Err(XteaError::InvalidVector(format!("unknown field `{other}`"))),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "count = 0\nrounds = 32\nkey = 000102030405060708090a0b0c0d0e0f\npt = 4142434445464748\nct = 497df3d072612cb5\n";

    #[test]
    fn parses_published_vector() {
        let v = parse_kat(ONE).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].rounds, 32);
        assert_eq!(v[0].key, [0x0001_0203, 0x0405_0607, 0x0809_0a0b, 0x0c0d_0e0f]);
        assert_eq!(v[0].pt, 0x4142_4344_4546_4748);
        assert_eq!(v[0].ct, 0x497d_f3d0_7261_2cb5);
    }

    #[test]
    fn display_parses_back() {
        let v = parse_kat(ONE).unwrap()[0];
        let txt = format!("# header\n\n{v}\n{}\n", KatVector { count: 1, ..v });
        let back = parse_kat(&txt).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0], v);
        assert_eq!(back[1].count, 1);
    }

    #[test]
    fn rejects_bad_records() {
        assert!(matches!(parse_kat("count = 0\nrounds = 32\n"), Err(XteaError::InvalidVector(_))));
        assert!(matches!(parse_kat("key = 0001\n"), Err(XteaError::InvalidVector(_))));
        assert!(matches!(parse_kat("bogus line\n"), Err(XteaError::InvalidVector(_))));
        assert!(matches!(parse_kat("colour = red\n"), Err(XteaError::InvalidVector(_))));
        assert_eq!(parse_kat("\n# nothing\n\n").unwrap(), Vec::new());
    }
}
