// Prints a Markdown table with latency/throughput of one XTEA block.
// Cycles = start + Init + 2 * rounds + done, taken from the cycle model.

use xtea_rhdl::xtea_core::transaction_cycles;
use xtea_rhdl::xtea_params::{r6, BLOCKBYTES};

fn main() {
    let rounds_list = [8u8, 16, 32, 63];
    let freqs_mhz = [100.0, 200.0, 250.0];

    println!("Latency formula: T_us = cycles / F_MHz");
    println!("Throughput formula: MB/s = F_MHz * {BLOCKBYTES} / cycles");
    println!();
    println!("| Rounds | Cycles | F (MHz) | Latency (us) | Throughput (blocks/s) | Throughput (MB/s) |");

    for &f in &freqs_mhz {
        let f_hz = f * 1e6;

        for &r in &rounds_list {
            let c = transaction_cycles(true, r6(r)).expect("rounds > 0") as f64;
            let lat_us = c / f;
            let thr = f_hz / c;
            let mbs = f * BLOCKBYTES as f64 / c;
            println!("| {}  | {}  | {}  | {:.3}   | {:.0} | {:.2} |", r, c as u64, f as u64, lat_us, thr, mbs);
        }
    }
}
