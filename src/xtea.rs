// Blocking XTEA API on top of the cycle model.
// Every call runs one full transaction on a fresh core, so nothing carries
// over between blocks.

use crate::xtea_core::run_core;
use crate::xtea_error::XteaError;
use crate::xtea_params::{r6, w32, RoundCount, BLOCKBYTES, DEFAULT_ROUNDS, KEYBYTES, KEY_WORDS, MAX_ROUNDS};
use crate::xtea_round::key_words;

/// Direction + round count, as written to CONFIG / ROUNDS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XteaConfig {
    pub encrypt: bool,
    pub rounds: u8,
}

impl Default for XteaConfig {
    fn default() -> Self {
        Self { encrypt: true, rounds: DEFAULT_ROUNDS }
    }
}

impl XteaConfig {
    pub fn encrypt(rounds: u8) -> Self {
        Self { encrypt: true, rounds }
    }

    pub fn decrypt(rounds: u8) -> Self {
        Self { encrypt: false, rounds }
    }

    /// Round count must be 1..=63.
    pub fn validate(&self) -> Result<RoundCount, XteaError> {
        if self.rounds == 0 {
            return Err(XteaError::ZeroRounds);
        }
        if self.rounds > MAX_ROUNDS {
            return Err(XteaError::RoundsOutOfRange(self.rounds as u32));
        }
        Ok(r6(self.rounds))
    }
}

/// Big-endian key words, k0 first.
pub fn key_from_bytes(key: &[u8; KEYBYTES]) -> [u32; KEY_WORDS] {
    let mut k = [0u32; KEY_WORDS];
    k.iter_mut().enumerate().for_each(|(i, w)| {
        *w = u32::from_be_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]);
    });
    k
}

pub fn key_from_u128(key: u128) -> [u32; KEY_WORDS] {
    key_from_bytes(&key.to_be_bytes())
}

#[inline(always)]
pub fn block_from_bytes(block: &[u8; BLOCKBYTES]) -> u64 {
    u64::from_be_bytes(*block)
}

/// One transaction, run to completion.
pub fn xtea_block(cfg: XteaConfig, key: [u32; KEY_WORDS], block: u64) -> Result<u64, XteaError> {
    let rounds = cfg.validate()?;
    let halves = [w32((block >> 32) as u32), w32(block as u32)];
    let run = run_core(cfg.encrypt, rounds, key_words(key), halves).ok_or(XteaError::CoreTimeout)?;
    Ok(((run.v0 as u64) << 32) | run.v1 as u64)
}

pub fn encrypt_block(key: [u32; KEY_WORDS], block: u64, rounds: u8) -> Result<u64, XteaError> {
    xtea_block(XteaConfig::encrypt(rounds), key, block)
}

pub fn decrypt_block(key: [u32; KEY_WORDS], block: u64, rounds: u8) -> Result<u64, XteaError> {
    xtea_block(XteaConfig::decrypt(rounds), key, block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation() {
        assert_eq!(XteaConfig::default(), XteaConfig::encrypt(32));
        assert_eq!(XteaConfig::encrypt(0).validate().unwrap_err(), XteaError::ZeroRounds);
        assert_eq!(
            XteaConfig::decrypt(64).validate().unwrap_err(),
            XteaError::RoundsOutOfRange(64)
        );
        assert_eq!(XteaConfig::decrypt(63).validate().unwrap().raw(), 63);
        assert_eq!(XteaConfig::encrypt(1).validate().unwrap().raw(), 1);
    }

    #[test]
    fn key_word_order_is_big_endian() {
        let bytes: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap().try_into().unwrap();
        assert_eq!(key_from_bytes(&bytes), [0x0001_0203, 0x0405_0607, 0x0809_0a0b, 0x0c0d_0e0f]);
        assert_eq!(key_from_u128(0x0001_0203_0405_0607_0809_0a0b_0c0d_0e0f), key_from_bytes(&bytes));
        assert_eq!(block_from_bytes(b"ABCDEFGH"), 0x4142_4344_4546_4748);
    }

    #[test]
    fn errors_surface_from_blocking_calls() {
        let k = [0u32; 4];
        assert_eq!(encrypt_block(k, 0, 0), Err(XteaError::ZeroRounds));
        assert_eq!(decrypt_block(k, 0, 100), Err(XteaError::RoundsOutOfRange(100)));
        assert_eq!(
            XteaError::RoundsOutOfRange(100).to_string(),
            "Round count 100 does not fit the 6-bit ROUNDS register."
        );
    }

    #[test]
    fn validated_configs_never_time_out() {
        (1..=MAX_ROUNDS).for_each(|r| {
            assert!(encrypt_block([1, 2, 3, 4], 5, r).is_ok(), "rounds = {r}");
            assert!(decrypt_block([1, 2, 3, 4], 5, r).is_ok(), "rounds = {r}");
        });
        assert_eq!(
            XteaError::CoreTimeout.to_string(),
            "Core did not return to ready within the cycle limit."
        );
    }

    #[test]
    fn known_vector() {
        let k = key_from_u128(0x0001_0203_0405_0607_0809_0a0b_0c0d_0e0f);
        assert_eq!(encrypt_block(k, 0x4142_4344_4546_4748, 32), Ok(0x497d_f3d0_7261_2cb5));
        assert_eq!(decrypt_block(k, 0x497d_f3d0_7261_2cb5, 32), Ok(0x4142_4344_4546_4748));
    }
}
