// XTEA round engine (combinational datapath).
// One call = one Feistel half-round; the control FSM in xtea_core.rs decides
// which half is updated and when `sum` advances.

use rhdl::prelude::*;

use crate::xtea_params::{u32_of, w32, KeySel, RoundCount, Word, DELTA, KEY_WORDS};

/// Four 32-bit subkeys, k0 = most significant word of the 128-bit key.
pub type KeyWords = [Word; KEY_WORDS];

/// Which half of the block a half-round writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    V0,
    V1,
}

/// Subkey index for a `v0` update: sum[1:0]
#[inline(always)]
pub fn sel_v0(sum: Word) -> KeySel {
    bits((u32_of(sum) & 0b11) as u128)
}

/// Subkey index for a `v1` update: sum[12:11]
#[inline(always)]
pub fn sel_v1(sum: Word) -> KeySel {
    bits(((u32_of(sum) >> 11) & 0b11) as u128)
}

#[inline(always)]
pub fn selector(half: Half, sum: Word) -> KeySel {
    match half {
        Half::V0 => sel_v0(sum),
        Half::V1 => sel_v1(sum),
    }
}

#[inline(always)]
pub fn subkey(key: &KeyWords, sel: KeySel) -> Word {
    key[sel.raw() as usize]
}

/// ((x << 4) ^ (x >> 5)) + x
#[inline(always)]
pub fn mix(other: Word) -> Word {
    let x = u32_of(other);
    w32(((x << 4) ^ (x >> 5)).wrapping_add(x))
}

/// mix(other) ^ (sum + key[selector(sum)])
#[inline(always)]
pub fn round_delta(half: Half, other: Word, sum: Word, key: &KeyWords) -> Word {
    let s = u32_of(sum);
    let keyterm = s.wrapping_add(u32_of(subkey(key, selector(half, sum))));
    w32(u32_of(mix(other)) ^ keyterm)
}

/// One Feistel half-round: returns the new value of the `half` being updated.
pub fn half_round(
    half: Half,
    encrypt: bool,
    active: Word,
    other: Word,
    sum: Word,
    key: &KeyWords,
) -> Word {
    let a = u32_of(active);
    let d = u32_of(round_delta(half, other, sum, key));
    if encrypt {
        w32(a.wrapping_add(d))
    } else {
        w32(a.wrapping_sub(d))
    }
}

/// Accumulator advance, once per full round.
#[inline(always)]
pub fn sum_step(sum: Word, encrypt: bool) -> Word {
    let s = u32_of(sum);
    if encrypt {
        w32(s.wrapping_add(DELTA))
    } else {
        w32(s.wrapping_sub(DELTA))
    }
}

/// 0 for encryption, DELTA * rounds (mod 2^32) for decryption.
#[inline(always)]
pub fn initial_sum(encrypt: bool, rounds: RoundCount) -> Word {
    if encrypt {
        w32(0)
    } else {
        w32(DELTA.wrapping_mul(rounds.raw() as u32))
    }
}

/// First half updated in a round: encrypt v0 -> v1, decrypt v1 -> v0.
#[inline(always)]
pub fn first_half(encrypt: bool) -> Half {
    if encrypt { Half::V0 } else { Half::V1 }
}

#[inline(always)]
pub fn second_half(encrypt: bool) -> Half {
    if encrypt { Half::V1 } else { Half::V0 }
}

pub fn key_words(key: [u32; KEY_WORDS]) -> KeyWords {
    key.map(w32)
}
