pub mod xtea_params;
pub mod xtea_error;

pub mod xtea_round;
pub mod xtea_core;
pub mod xtea_regs;

pub mod xtea;
pub mod xtea_cipher;

pub mod xtea_drbg;
pub mod xtea_kat;
pub mod xtea_test;
