use xtea_rhdl::xtea::XteaConfig;
use xtea_rhdl::xtea_core::{transaction_cycles, xtea_step, CoreIn, CoreState};
use xtea_rhdl::xtea_params::{r6, w32};
use xtea_rhdl::xtea_regs::XteaBus;
use xtea_rhdl::xtea_round::key_words;

// Core runner: start pulse on the first cycle, count until ready comes back.

fn core_cycles(encdec: bool, rounds: u8) -> u64 {
    let mut st = CoreState::reset();
    let mut inp = CoreIn {
        next: true, // pulse 1 cycle
        encdec,
        rounds: r6(rounds),
        key: key_words([0x0001_0203, 0x0405_0607, 0x0809_0a0b, 0x0c0d_0e0f]),
        block: [w32(0x4142_4344), w32(0x4546_4748)],
    };
    let mut cycles: u64 = 0;

    loop {
        let (nst, out) = xtea_step(st, inp);
        cycles += 1;
        inp.next = false;
        st = nst;

        // ready is registered: it reads low from the cycle after the start
        if cycles > 1 && out.ready {
            break;
        }
        if cycles > 1_000 {
            panic!("XTEA core stuck (rounds = {rounds})");
        }
    }

    cycles
}

fn bus_cycles(encrypt: bool, rounds: u8) -> (u64, u64) {
    let mut bus = XteaBus::new();
    let run = bus
        .transact(XteaConfig { encrypt, rounds }, [1, 2, 3, 4], 0x0123_4567_89ab_cdef)
        .expect("transaction");
    (run.busy_cycles, run.total_cycles)
}

fn main() {
    println!("Cycles counted (core includes start and done cycles)");
    println!("| rounds | core enc | core dec | bus busy | bus total |");

    for rounds in [1u8, 8, 16, 32, 63] {
        let enc = core_cycles(true, rounds);
        let dec = core_cycles(false, rounds);
        assert_eq!(Some(enc), transaction_cycles(true, r6(rounds)));
        assert_eq!(Some(dec), transaction_cycles(false, r6(rounds)));
        let (busy, total) = bus_cycles(true, rounds);
        println!("| {rounds} | {enc} | {dec} | {busy} | {total} |");
    }
}
