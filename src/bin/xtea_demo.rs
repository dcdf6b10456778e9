use xtea_rhdl::xtea::{key_from_u128, XteaConfig};
use xtea_rhdl::xtea_params::{ADDR_NAME0, ADDR_NAME1, ADDR_VERSION};
use xtea_rhdl::xtea_regs::XteaBus;

fn word(x: u32) -> String {
    hex::encode(x.to_be_bytes())
}

fn main() {
    let mut bus = XteaBus::new();

    let name0 = bus.read(ADDR_NAME0).to_be_bytes();
    let name1 = bus.read(ADDR_NAME1).to_be_bytes();
    let version = bus.read(ADDR_VERSION).to_be_bytes();
    println!(
        "core: {}{} v{}",
        String::from_utf8_lossy(&name0),
        String::from_utf8_lossy(&name1),
        String::from_utf8_lossy(&version)
    );

    let key = key_from_u128(0x0001_0203_0405_0607_0809_0a0b_0c0d_0e0f);
    let pt: u64 = 0x4142_4344_4546_4748;

    let enc = bus.transact(XteaConfig::encrypt(32), key, pt).expect("encrypt");
    let dec = bus.transact(XteaConfig::decrypt(32), key, enc.result).expect("decrypt");

    println!("key       = {}", key.iter().map(|&k| word(k)).collect::<Vec<_>>().join(" "));
    println!("pt        = {} {}", word((pt >> 32) as u32), word(pt as u32));
    println!("ct        = {} {}", word((enc.result >> 32) as u32), word(enc.result as u32));
    println!("pt(dec)   = {} {}", word((dec.result >> 32) as u32), word(dec.result as u32));
    println!("busy      = {} cycles, total = {} cycles", enc.busy_cycles, enc.total_cycles);
    println!("match     = {}", dec.result == pt && enc.result == 0x497d_f3d0_7261_2cb5);
}
