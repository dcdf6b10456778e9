// XTEA-128 core parameters + register map (secworks-style address layout)
use rhdl::prelude::*;

/// Golden-ratio round constant.
pub const DELTA: u32 = 0x9E37_79B9;

/// 32 full rounds = 64 Feistel half-rounds.
pub const DEFAULT_ROUNDS: u8 = 32;
/// ROUNDS register is 6 bits wide.
pub const MAX_ROUNDS: u8 = 63;

pub const KEY_WORDS: usize = 4;
pub const BLOCK_WORDS: usize = 2;
pub const KEYBYTES: usize = 16;
pub const BLOCKBYTES: usize = 8;

// ------------------------------
// Address map (8-bit word addresses)
// ------------------------------

pub const ADDR_NAME0: u8 = 0x00;
pub const ADDR_NAME1: u8 = 0x01;
pub const ADDR_VERSION: u8 = 0x02;

pub const ADDR_CTRL: u8 = 0x08;
pub const CTRL_NEXT_BIT: u32 = 1;

pub const ADDR_STATUS: u8 = 0x09;
pub const STATUS_READY_BIT: u32 = 0;

pub const ADDR_CONFIG: u8 = 0x0a;
pub const CONFIG_ENCDEC_BIT: u32 = 0;

pub const ADDR_ROUNDS: u8 = 0x0b;

pub const ADDR_KEY0: u8 = 0x10;
pub const ADDR_KEY3: u8 = 0x13;

pub const ADDR_BLOCK0: u8 = 0x20;
pub const ADDR_BLOCK1: u8 = 0x21;

pub const ADDR_RESULT0: u8 = 0x30;
pub const ADDR_RESULT1: u8 = 0x31;

// "xtea" "-128" "0.10"
pub const CORE_NAME0: u32 = 0x7874_6561;
pub const CORE_NAME1: u32 = 0x2d31_3238;
pub const CORE_VERSION: u32 = 0x302e_3130;

/// 32-bit datapath word
pub type Word = Bits<U32>;
/// 6-bit round count / round counter
pub type RoundCount = Bits<U6>;
/// 2-bit subkey index
pub type KeySel = Bits<U2>;
/// 8-bit bus address
pub type Addr = Bits<U8>;

#[inline(always)]
pub fn w32(x: u32) -> Word {
    bits(x as u128)
}

#[inline(always)]
pub fn u32_of(x: Word) -> u32 {
    x.raw() as u32
}

#[inline(always)]
pub fn r6(x: u8) -> RoundCount {
    bits((x & MAX_ROUNDS) as u128)
}

#[inline(always)]
pub fn a8(x: u8) -> Addr {
    bits(x as u128)
}
