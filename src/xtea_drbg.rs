// AES-256 CTR-DRBG (SP 800-90A, no derivation function) used as a
// reproducible source of XTEA test vectors: keys, blocks, round counts.
// State: Key (32 bytes), V (16 bytes). Seed length: 48 bytes.

use aes::Aes256;
use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};

use crate::xtea_params::{KEY_WORDS, MAX_ROUNDS};

pub const SEEDBYTES: usize = 48;

/// Fixed seed for the in-tree tests and the default KAT file.
pub const DEFAULT_SEED: [u8; SEEDBYTES] = [
    0x78, 0x74, 0x65, 0x61, 0x2d, 0x31, 0x32, 0x38, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
    0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x9e, 0x37, 0x79, 0xb9, 0x30, 0x2e, 0x31, 0x30, 0x49, 0x7d, 0xf3, 0xd0, 0x72, 0x61, 0x2c, 0xb5,
];

pub struct VectorDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

impl VectorDrbg {
    pub fn new(seed: &[u8; SEEDBYTES]) -> Self {
        let mut drbg = Self { key: [0u8; 32], v: [0u8; 16] };
        drbg.update(Some(seed));
        drbg
    }

    fn next_counter_block(&mut self) -> [u8; 16] {
        // V is a 128-bit big-endian counter
        self.v = u128::from_be_bytes(self.v).wrapping_add(1).to_be_bytes();

        let aes = Aes256::new(GenericArray::from_slice(&self.key));
        let mut block = GenericArray::clone_from_slice(&self.v);
        aes.encrypt_block(&mut block);
        let mut out = [0u8; 16];
        out.copy_from_slice(&block);
        out
    }

    fn update(&mut self, provided: Option<&[u8; SEEDBYTES]>) {
        let mut temp = [0u8; SEEDBYTES];
        temp.chunks_exact_mut(16).for_each(|chunk| {
            let block = self.next_counter_block();
            chunk.copy_from_slice(&block);
        });

        if let Some(pd) = provided {
            temp.iter_mut().zip(pd.iter()).for_each(|(t, p)| *t ^= p);
        }

        self.key.copy_from_slice(&temp[0..32]);
        self.v.copy_from_slice(&temp[32..48]);
    }

    pub fn randombytes(&mut self, out: &mut [u8]) {
        out.chunks_mut(16).for_each(|chunk| {
            let block = self.next_counter_block();
            chunk.copy_from_slice(&block[..chunk.len()]);
        });
        self.update(None);
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.randombytes(&mut b);
        u32::from_be_bytes(b)
    }

    pub fn next_key(&mut self) -> [u32; KEY_WORDS] {
        let mut b = [0u8; 16];
        self.randombytes(&mut b);
        crate::xtea::key_from_bytes(&b)
    }

    pub fn next_block(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.randombytes(&mut b);
        u64::from_be_bytes(b)
    }

    /// Uniform-ish round count in 1..=63.
    pub fn next_rounds(&mut self) -> u8 {
        (self.next_u32() % MAX_ROUNDS as u32) as u8 + 1
    }
}
