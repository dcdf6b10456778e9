// RustCrypto `cipher` 0.4 surface for the XTEA core.
// 16-byte key and 8-byte block, both big-endian; each block is one FSM transaction.

use core::fmt;

use cipher::{
    consts::{U1, U16, U8},
    generic_array::GenericArray,
    inout::InOut,
    AlgorithmName, BlockBackend, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt, BlockSizeUser, Key,
    KeyInit, KeySizeUser, ParBlocksSizeUser,
};

use crate::xtea::{block_from_bytes, key_from_bytes, XteaConfig};
use crate::xtea_core::run_core;
use crate::xtea_error::XteaError;
use crate::xtea_params::{r6, w32, RoundCount, DEFAULT_ROUNDS, KEY_WORDS};
use crate::xtea_round::key_words;

/// 64-bit XTEA block
pub type Block = GenericArray<u8, U8>;

/// XTEA with a fixed key and round count.
#[derive(Clone)]
pub struct Xtea {
    key: [u32; KEY_WORDS],
    rounds: RoundCount, // never 0
}

impl Xtea {
    /// Non-default round count (1..=63).
    pub fn with_rounds(key: &Key<Self>, rounds: u8) -> Result<Self, XteaError> {
        let rounds = XteaConfig::encrypt(rounds).validate()?;
        let mut k = [0u8; 16];
        k.copy_from_slice(key);
        Ok(Self { key: key_from_bytes(&k), rounds })
    }

    pub fn rounds(&self) -> u8 {
        self.rounds.raw() as u8
    }

    fn crypt(&self, encrypt: bool, block: &Block) -> Block {
        let mut b = [0u8; 8];
        b.copy_from_slice(block);
        let x = block_from_bytes(&b);

        let run = match run_core(encrypt, self.rounds, key_words(self.key), [w32((x >> 32) as u32), w32(x as u32)]) {
            Some(run) => run,
            None => unreachable!("round count is checked in the constructor"),
        };

        let y = ((run.v0 as u64) << 32) | run.v1 as u64;
        *Block::from_slice(&y.to_be_bytes())
    }
}

impl KeySizeUser for Xtea {
    type KeySize = U16;
}

impl KeyInit for Xtea {
    #[inline]
    fn new(key: &Key<Self>) -> Self {
        let mut k = [0u8; 16];
        k.copy_from_slice(key);
        Self { key: key_from_bytes(&k), rounds: r6(DEFAULT_ROUNDS) }
    }
}

impl BlockSizeUser for Xtea {
    type BlockSize = U8;
}

impl BlockCipher for Xtea {}

impl BlockEncrypt for Xtea {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = U8>) {
        f.call(&mut XteaBackEnc(self))
    }
}

impl BlockDecrypt for Xtea {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = U8>) {
        f.call(&mut XteaBackDec(self))
    }
}

impl fmt::Debug for Xtea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str("Xtea { .. }")
    }
}

impl AlgorithmName for Xtea {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XTEA")
    }
}

struct XteaBackEnc<'a>(&'a Xtea);

impl<'a> BlockSizeUser for XteaBackEnc<'a> {
    type BlockSize = U8;
}

impl<'a> ParBlocksSizeUser for XteaBackEnc<'a> {
    type ParBlocksSize = U1;
}

impl<'a> BlockBackend for XteaBackEnc<'a> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block>) {
        let res = self.0.crypt(true, block.get_in());
        *block.get_out() = res;
    }
}

struct XteaBackDec<'a>(&'a Xtea);

impl<'a> BlockSizeUser for XteaBackDec<'a> {
    type BlockSize = U8;
}

impl<'a> ParBlocksSizeUser for XteaBackDec<'a> {
    type ParBlocksSize = U1;
}

impl<'a> BlockBackend for XteaBackDec<'a> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block>) {
        let res = self.0.crypt(false, block.get_in());
        *block.get_out() = res;
    }
}
