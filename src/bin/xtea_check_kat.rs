// Checks kat_xtea.txt produced by xtea_gen_kat.rs, twice per vector:
// through the register bus model and through the `cipher` trait surface.

use std::env;
use std::fs;

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt};

use xtea_rhdl::xtea::XteaConfig;
use xtea_rhdl::xtea_cipher::Xtea;
use xtea_rhdl::xtea_kat::parse_kat;
use xtea_rhdl::xtea_regs::XteaBus;

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "kat_xtea.txt".to_string());
    let txt = fs::read_to_string(&path).expect("missing kat_xtea.txt");
    let vectors = parse_kat(&txt).expect("malformed KAT file");

    let mut bus = XteaBus::new();
    let mut ok = 0usize;

    for v in &vectors {
        // register interface
        let enc = bus.transact(XteaConfig::encrypt(v.rounds), v.key, v.pt).expect("bus encrypt");
        assert_eq!(enc.result, v.ct, "ct mismatch (bus) at count={}", v.count);
        assert_eq!(enc.busy_cycles, 2 * v.rounds as u64 + 1, "cycle count at count={}", v.count);

        let dec = bus.transact(XteaConfig::decrypt(v.rounds), v.key, v.ct).expect("bus decrypt");
        assert_eq!(dec.result, v.pt, "pt mismatch (bus) at count={}", v.count);

        // cipher traits
        let key_bytes: Vec<u8> = v.key.iter().flat_map(|k| k.to_be_bytes()).collect();
        let c = Xtea::with_rounds(GenericArray::from_slice(&key_bytes), v.rounds).expect("round count");

        let mut block = GenericArray::clone_from_slice(&v.pt.to_be_bytes());
        c.encrypt_block(&mut block);
        assert_eq!(block.as_slice(), &v.ct.to_be_bytes()[..], "ct mismatch (cipher) at count={}", v.count);

        c.decrypt_block(&mut block);
        assert_eq!(block.as_slice(), &v.pt.to_be_bytes()[..], "pt mismatch (cipher) at count={}", v.count);

        ok += 1;
    }

    println!("KAT check OK for {} vectors ({} bus cycles)", ok, bus.cycles());
}
