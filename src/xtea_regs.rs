// src/xtea_regs.rs
// Memory-mapped register wrapper around the XTEA core.
//
// CTRL (next), KEY* and BLOCK* writes are gated on core ready.
// CONFIG and ROUNDS are always writable; the core latches them on start.
// Reads of unmapped addresses return 0.

use rhdl::prelude::*;

use crate::xtea::XteaConfig;
use crate::xtea_core::{xtea_step, CoreIn, CoreState};
use crate::xtea_error::XteaError;
use crate::xtea_params::*;
use crate::xtea_round::KeyWords;

/// Bus request for one cycle
#[derive(Copy, Clone, Default)]
pub struct BusIn {
    pub cs: bool,
    pub we: bool,
    pub addr: Addr,
    pub write_data: Word,
}

/// Combinational read data
#[derive(Copy, Clone, Default)]
pub struct BusOut {
    pub read_data: Word,
}

#[derive(Copy, Clone)]
pub struct RegsState {
    pub next: bool, // one-cycle pulse
    pub encdec: bool,
    pub rounds: RoundCount,
    pub key: KeyWords,
    pub block: [Word; BLOCK_WORDS],

    pub core: CoreState,
}

impl Default for RegsState {
    fn default() -> Self {
        Self::reset()
    }
}

impl RegsState {
    pub fn reset() -> Self {
        Self {
            next: false,
            encdec: false,
            rounds: r6(DEFAULT_ROUNDS),
            key: [w32(0); KEY_WORDS],
            block: [w32(0); BLOCK_WORDS],
            core: CoreState::reset(),
        }
    }
}

#[inline(always)]
fn bit(x: u32, n: u32) -> bool {
    (x >> n) & 1 == 1
}

/// Read mux
pub fn read_reg(st: &RegsState, addr: Addr) -> Word {
    let a: u8 = addr.raw() as u8;
    let result = st.core.result();

    match a {
        ADDR_NAME0 => w32(CORE_NAME0),
        ADDR_NAME1 => w32(CORE_NAME1),
        ADDR_VERSION => w32(CORE_VERSION),
        ADDR_STATUS => w32((st.core.ready as u32) << STATUS_READY_BIT),
        ADDR_CONFIG => w32((st.encdec as u32) << CONFIG_ENCDEC_BIT),
        ADDR_ROUNDS => w32(st.rounds.raw() as u32),
        ADDR_RESULT0 => result[0],
        ADDR_RESULT1 => result[1],
        _ => w32(0),
    }
}

/// One clock cycle of wrapper + core.
pub fn regs_step(st: RegsState, bus: BusIn) -> (RegsState, BusOut) {
    let mut ns = st;
    let mut out = BusOut::default();

    // core_ready as seen by the address decoder this cycle
    let ready = st.core.ready;

    if bus.cs && !bus.we {
        out.read_data = read_reg(&st, bus.addr);
    }

    let core_in = CoreIn {
        next: st.next,
        encdec: st.encdec,
        rounds: st.rounds,
        key: st.key,
        block: st.block,
    };
    let (core_next, _) = xtea_step(st.core, core_in);
    ns.core = core_next;

    ns.next = false;
    if bus.cs && bus.we {
        let a: u8 = bus.addr.raw() as u8;
        let d: u32 = u32_of(bus.write_data);

        match a {
            ADDR_CTRL => {
                if ready {
                    ns.next = bit(d, CTRL_NEXT_BIT);
                }
            }
            ADDR_CONFIG => {
                ns.encdec = bit(d, CONFIG_ENCDEC_BIT);
            }
            ADDR_ROUNDS => {
                ns.rounds = r6(d as u8);
            }
            ADDR_KEY0..=ADDR_KEY3 => {
                if ready {
                    ns.key[(a - ADDR_KEY0) as usize] = bus.write_data;
                }
            }
            ADDR_BLOCK0 | ADDR_BLOCK1 => {
                if ready {
                    ns.block[(a - ADDR_BLOCK0) as usize] = bus.write_data;
                }
            }
            _ => {}
        }
    }

    (ns, out)
}

// -----------------------------------------------------------------------------
// Software bus master (host side): read/write/tick + whole transactions.
// -----------------------------------------------------------------------------

/// Init + 2 * MAX_ROUNDS half-rounds, plus the read that sees ready.
const TRANSACTION_POLLS: u64 = 2 * MAX_ROUNDS as u64 + 2;

/// Outcome of one bus transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BusRun {
    pub result: u64,
    /// status reads that returned busy
    pub busy_cycles: u64,
    /// all bus cycles, including setup writes and result reads
    pub total_cycles: u64,
}

#[derive(Clone, Default)]
pub struct XteaBus {
    st: RegsState,
    cycles: u64,
}

impl XteaBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.st = RegsState::reset();
        self.cycles = 0;
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn state(&self) -> &RegsState {
        &self.st
    }

    /// Drive one cycle, returns the read data of that cycle.
    pub fn clock(&mut self, bus: BusIn) -> u32 {
        let (ns, out) = regs_step(self.st, bus);
        self.st = ns;
        self.cycles += 1;
        u32_of(out.read_data)
    }

    pub fn write(&mut self, addr: u8, data: u32) {
        self.clock(BusIn { cs: true, we: true, addr: a8(addr), write_data: w32(data) });
    }

    pub fn read(&mut self, addr: u8) -> u32 {
        self.clock(BusIn { cs: true, we: false, addr: a8(addr), write_data: w32(0) })
    }

    pub fn tick(&mut self) {
        self.clock(BusIn::default());
    }

    pub fn ready(&mut self) -> bool {
        bit(self.read(ADDR_STATUS), STATUS_READY_BIT)
    }

    pub fn write_key(&mut self, key: [u32; KEY_WORDS]) {
        key.iter().enumerate().for_each(|(i, &k)| self.write(ADDR_KEY0 + i as u8, k));
    }

    pub fn write_block(&mut self, block: u64) {
        self.write(ADDR_BLOCK0, (block >> 32) as u32);
        self.write(ADDR_BLOCK1, block as u32);
    }

    pub fn read_result(&mut self) -> u64 {
        let hi = self.read(ADDR_RESULT0) as u64;
        let lo = self.read(ADDR_RESULT1) as u64;
        (hi << 32) | lo
    }

    /// Pulse next and give the core one cycle to accept it.
    pub fn start(&mut self) {
        self.write(ADDR_CTRL, 1 << CTRL_NEXT_BIT);
        self.tick();
    }

    /// Poll STATUS until ready; returns the number of busy reads.
    pub fn wait_ready(&mut self, max_polls: u64) -> Option<u64> {
        let mut busy = 0u64;
        while !self.ready() {
            busy += 1;
            if busy > max_polls {
                return None;
            }
        }
        Some(busy)
    }

    /// Let any transaction already in flight finish, including a start
    /// pulse written but not yet seen by the core.
    pub fn drain(&mut self) -> Result<u64, XteaError> {
        if self.st.next {
            self.tick();
        }
        self.wait_ready(TRANSACTION_POLLS).ok_or(XteaError::CoreTimeout)
    }

    /// Full transaction: drain, config, rounds, key, block, start, poll, read result.
    pub fn transact(&mut self, cfg: XteaConfig, key: [u32; KEY_WORDS], block: u64) -> Result<BusRun, XteaError> {
        cfg.validate()?;
        let t0 = self.cycles;

        // gated writes below are dropped unless the core is idle
        self.drain()?;

        self.write(ADDR_CONFIG, (cfg.encrypt as u32) << CONFIG_ENCDEC_BIT);
        self.write(ADDR_ROUNDS, cfg.rounds as u32);
        self.write_key(key);
        self.write_block(block);
        self.start();

        let busy_cycles = self.wait_ready(TRANSACTION_POLLS).ok_or(XteaError::CoreTimeout)?;
        let result = self.read_result();

        Ok(BusRun {
            result,
            busy_cycles,
            total_cycles: self.cycles - t0,
        })
    }
}
