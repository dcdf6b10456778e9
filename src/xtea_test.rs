#[cfg(test)]
mod tests {
    use crate::xtea::{decrypt_block, encrypt_block, key_from_u128, xtea_block, XteaConfig};
    use crate::xtea_drbg::{VectorDrbg, DEFAULT_SEED};
    use crate::xtea_regs::XteaBus;

    const KEY: u128 = 0x0001_0203_0405_0607_0809_0a0b_0c0d_0e0f;

    /// Plain software XTEA, loop form, used only as an oracle.
    fn oracle_encrypt(k: [u32; 4], block: u64, rounds: u8) -> u64 {
        let (mut v0, mut v1) = ((block >> 32) as u32, block as u32);
        let mut sum = 0u32;
        (0..rounds).for_each(|_| {
            v0 = v0.wrapping_add(
                (((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1)) ^ sum.wrapping_add(k[(sum & 3) as usize]),
            );
            sum = sum.wrapping_add(0x9E37_79B9);
            v1 = v1.wrapping_add(
                (((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0)) ^ sum.wrapping_add(k[((sum >> 11) & 3) as usize]),
            );
        });
        ((v0 as u64) << 32) | v1 as u64
    }

    #[test]
    fn test_known_vector() {
        let k = key_from_u128(KEY);
        let ct = encrypt_block(k, 0x4142_4344_4546_4748, 32).unwrap();
        assert_eq!(format!("{:016x}", ct), "497df3d072612cb5");
        let pt = decrypt_block(k, ct, 32).unwrap();
        assert_eq!(pt, 0x4142_4344_4546_4748);
    }

    #[test]
    fn test_round_trip_random_vectors() {
        let mut drbg = VectorDrbg::new(&DEFAULT_SEED);
        (0..64).for_each(|_| {
            let k = drbg.next_key();
            let b = drbg.next_block();
            let r = drbg.next_rounds();

            let ct = encrypt_block(k, b, r).unwrap();
            assert_eq!(decrypt_block(k, ct, r).unwrap(), b, "rounds = {r}");
        });
    }

    #[test]
    fn test_matches_oracle() {
        let mut drbg = VectorDrbg::new(&DEFAULT_SEED);
        (0..32).for_each(|_| {
            let k = drbg.next_key();
            let b = drbg.next_block();
            let r = drbg.next_rounds();
            assert_eq!(encrypt_block(k, b, r).unwrap(), oracle_encrypt(k, b, r));
        });
    }

    #[test]
    fn test_bus_matches_blocking_api() {
        let mut drbg = VectorDrbg::new(&DEFAULT_SEED);
        let mut bus = XteaBus::new();
        (0..16).for_each(|i| {
            let cfg = XteaConfig { encrypt: i % 2 == 0, rounds: drbg.next_rounds() };
            let k = drbg.next_key();
            let b = drbg.next_block();

            let run = bus.transact(cfg, k, b).unwrap();
            assert_eq!(run.result, xtea_block(cfg, k, b).unwrap());
            assert_eq!(run.busy_cycles, 2 * cfg.rounds as u64 + 1);
        });
    }

    #[test]
    fn test_determinism() {
        let k = key_from_u128(KEY);
        let first = encrypt_block(k, 0x0123_4567_89ab_cdef, 17).unwrap();
        (0..5).for_each(|_| {
            assert_eq!(encrypt_block(k, 0x0123_4567_89ab_cdef, 17).unwrap(), first);
        });

        // a reused bus gives the same answer as a fresh one
        let mut bus = XteaBus::new();
        let cfg = XteaConfig::encrypt(17);
        bus.transact(XteaConfig::decrypt(5), [1, 2, 3, 4], 42).unwrap();
        assert_eq!(bus.transact(cfg, k, 0x0123_4567_89ab_cdef).unwrap().result, first);
        assert_eq!(XteaBus::new().transact(cfg, k, 0x0123_4567_89ab_cdef).unwrap().result, first);
    }

    #[test]
    fn test_round_count_sensitivity() {
        let k = key_from_u128(KEY);
        let b = 0x4142_4344_4546_4748;
        let one = encrypt_block(k, b, 1).unwrap();
        let full = encrypt_block(k, b, 32).unwrap();
        assert_ne!(one, full);
        assert_ne!(one, b);

        let mut seen: Vec<u64> = (1..=16).map(|r| encrypt_block(k, b, r).unwrap()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_decrypt_with_wrong_rounds_fails() {
        let k = key_from_u128(KEY);
        let ct = encrypt_block(k, 0x4142_4344_4546_4748, 32).unwrap();
        assert_ne!(decrypt_block(k, ct, 31).unwrap(), 0x4142_4344_4546_4748);
    }

    #[test]
    fn test_wrong_key_fails() {
        let k = key_from_u128(KEY);
        let k2 = key_from_u128(KEY ^ 1);
        let ct = encrypt_block(k, 0x4142_4344_4546_4748, 32).unwrap();
        assert_ne!(decrypt_block(k2, ct, 32).unwrap(), 0x4142_4344_4546_4748);
    }
}
