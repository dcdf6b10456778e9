// src/xtea_core.rs
// XTEA control FSM in RHDL style: state registers + one-cycle step function.
//
// Idle -> Init -> (Rounds0 -> Rounds1) x rounds -> Idle
// Rounds0 advances `sum` and updates the first half with the old `sum`,
// Rounds1 updates the second half with the advanced one.

use rhdl::prelude::*;

use crate::xtea_params::{r6, u32_of, w32, RoundCount, Word, DEFAULT_ROUNDS};
use crate::xtea_round::{
    first_half, half_round, initial_sum, second_half, sum_step, Half, KeyWords,
};

/// Core inputs, sampled every cycle
#[derive(Copy, Clone, Default)]
pub struct CoreIn {
    /// start pulse, only seen in Idle
    pub next: bool,
    pub encdec: bool,
    pub rounds: RoundCount,
    pub key: KeyWords,
    pub block: [Word; 2],
}

/// Core outputs (registered)
#[derive(Copy, Clone, Default)]
pub struct CoreOut {
    pub ready: bool,
    pub result: [Word; 2],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Init,
    Rounds0,
    Rounds1,
}

impl Default for Phase {
    fn default() -> Self { Phase::Idle }
}

#[derive(Copy, Clone)]
pub struct CoreState {
    pub phase: Phase,
    pub ready: bool,

    // latched on start
    pub encdec: bool,
    pub rounds: RoundCount,

    pub v0: Word,
    pub v1: Word,
    pub sum: Word,
    pub round: RoundCount, // full rounds done, 0..rounds-1
}

impl Default for CoreState {
    fn default() -> Self {
        Self::reset()
    }
}

impl CoreState {
    /// Asynchronous reset values.
    pub fn reset() -> Self {
        Self {
            phase: Phase::Idle,
            ready: true,
            encdec: false,
            rounds: r6(DEFAULT_ROUNDS),
            v0: w32(0),
            v1: w32(0),
            sum: w32(0),
            round: r6(0),
        }
    }

    #[inline(always)]
    pub fn result(&self) -> [Word; 2] {
        [self.v0, self.v1]
    }

    #[inline(always)]
    fn half(&self, h: Half) -> (Word, Word) {
        match h {
            Half::V0 => (self.v0, self.v1),
            Half::V1 => (self.v1, self.v0),
        }
    }

    #[inline(always)]
    fn set_half(&mut self, h: Half, x: Word) {
        match h {
            Half::V0 => self.v0 = x,
            Half::V1 => self.v1 = x,
        }
    }
}

#[inline(always)]
fn is_last_round(st: &CoreState) -> bool {
    // round == rounds - 1, written without the subtraction
    (st.round.raw() as u8).wrapping_add(1) == st.rounds.raw() as u8
}

/// One-cycle step of the control FSM.
/// Outputs reflect the registers before the clock edge.
pub fn xtea_step(st: CoreState, inp: CoreIn) -> (CoreState, CoreOut) {
    let mut ns = st;
    let out = CoreOut {
        ready: st.ready,
        result: st.result(),
    };

    match st.phase {
        Phase::Idle => {
            // rounds == 0 never starts: the core stays ready
            if inp.next && st.ready && inp.rounds.raw() != 0 {
                ns.encdec = inp.encdec;
                ns.rounds = inp.rounds;
                ns.ready = false;
                ns.phase = Phase::Init;
            }
        }

        Phase::Init => {
            ns.v0 = inp.block[0];
            ns.v1 = inp.block[1];
            ns.round = r6(0);
            ns.sum = initial_sum(st.encdec, st.rounds);
            ns.phase = Phase::Rounds0;
        }

        Phase::Rounds0 => {
            let h = first_half(st.encdec);
            let (active, other) = st.half(h);
            ns.set_half(h, half_round(h, st.encdec, active, other, st.sum, &inp.key));
            ns.sum = sum_step(st.sum, st.encdec);
            ns.phase = Phase::Rounds1;
        }

        Phase::Rounds1 => {
            let h = second_half(st.encdec);
            let (active, other) = st.half(h);
            ns.set_half(h, half_round(h, st.encdec, active, other, st.sum, &inp.key));

            if is_last_round(&st) {
                ns.ready = true;
                ns.phase = Phase::Idle;
            } else {
                ns.round = r6((st.round.raw() as u8).wrapping_add(1));
                ns.phase = Phase::Rounds0;
            }
        }
    }

    (ns, out)
}

// -----------------------------------------------------------------------------
// Software wrapper: run one transaction to completion on a fresh core.
// -----------------------------------------------------------------------------

/// Result of a run: output block and the number of cycles with ready low.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CoreRun {
    pub v0: u32,
    pub v1: u32,
    pub busy_cycles: u64,
}

/// Pulses `next` once and clocks until `ready` comes back.
/// Returns None when the core never left Idle (rounds == 0).
pub fn run_core(encdec: bool, rounds: RoundCount, key: KeyWords, block: [Word; 2]) -> Option<CoreRun> {
    let mut st = CoreState::reset();
    let mut inp = CoreIn { next: true, encdec, rounds, key, block };

    let (ns, _) = xtea_step(st, inp);
    st = ns;
    inp.next = false;
    if st.ready {
        return None;
    }

    // Init + 2 * 63 half-rounds is the longest transaction
    let limit = 2 * (rounds.raw() as u64) + 1;
    let mut busy_cycles = 0u64;
    while !st.ready {
        let (ns, _) = xtea_step(st, inp);
        st = ns;
        busy_cycles += 1;
        if busy_cycles > limit {
            // unreachable for a well-formed state
            return None;
        }
    }

    Some(CoreRun {
        v0: u32_of(st.v0),
        v1: u32_of(st.v1),
        busy_cycles,
    })
}

/// Cycles for one transaction seen from the core's ports:
/// start + busy cycles + the cycle that reports ready again.
pub fn transaction_cycles(encdec: bool, rounds: RoundCount) -> Option<u64> {
    run_core(encdec, rounds, [w32(0); 4], [w32(0); 2]).map(|run| run.busy_cycles + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtea_round::key_words;

    const KEY: [u32; 4] = [0x0001_0203, 0x0405_0607, 0x0809_0a0b, 0x0c0d_0e0f];

    fn core_in(next: bool, encdec: bool, rounds: u8, block: [u32; 2]) -> CoreIn {
        CoreIn {
            next,
            encdec,
            rounds: r6(rounds),
            key: key_words(KEY),
            block: block.map(w32),
        }
    }

    #[test]
    fn reset_state_is_idle_and_ready() {
        let st = CoreState::reset();
        assert_eq!(st.phase, Phase::Idle);
        assert!(st.ready);
        assert_eq!(u32_of(st.v0), 0);
        assert_eq!(u32_of(st.v1), 0);
        assert_eq!(u32_of(st.sum), 0);
        assert_eq!(st.round.raw(), 0);
    }

    #[test]
    fn phase_sequence_for_two_rounds() {
        let mut st = CoreState::reset();
        let mut inp = core_in(true, true, 2, [1, 2]);
        let mut seen = Vec::new();

        (0..7).for_each(|_| {
            seen.push(st.phase);
            let (ns, _) = xtea_step(st, inp);
            st = ns;
            inp.next = false;
        });

        assert_eq!(
            seen,
            vec![
                Phase::Idle,
                Phase::Init,
                Phase::Rounds0,
                Phase::Rounds1,
                Phase::Rounds0,
                Phase::Rounds1,
                Phase::Idle,
            ]
        );
        assert!(st.ready);
    }

    #[test]
    fn known_vector_encrypt_and_decrypt() {
        let run = run_core(true, r6(32), key_words(KEY), [w32(0x4142_4344), w32(0x4546_4748)]).unwrap();
        assert_eq!((run.v0, run.v1), (0x497d_f3d0, 0x7261_2cb5));

        let back = run_core(false, r6(32), key_words(KEY), [w32(run.v0), w32(run.v1)]).unwrap();
        assert_eq!((back.v0, back.v1), (0x4142_4344, 0x4546_4748));
    }

    #[test]
    fn busy_for_init_plus_two_steps_per_round() {
        [true, false].into_iter().for_each(|encdec| {
            [1u8, 5, 32, 63].into_iter().for_each(|r| {
                let run = run_core(encdec, r6(r), key_words(KEY), [w32(7), w32(9)]).unwrap();
                assert_eq!(run.busy_cycles, 2 * r as u64 + 1, "encdec = {encdec}, rounds = {r}");
                assert_eq!(transaction_cycles(encdec, r6(r)), Some(2 * r as u64 + 3));
            });
        });
    }

    #[test]
    fn zero_rounds_is_never_accepted() {
        assert!(run_core(true, r6(0), key_words(KEY), [w32(1), w32(2)]).is_none());

        let (st, out) = xtea_step(CoreState::reset(), core_in(true, true, 0, [1, 2]));
        assert!(out.ready);
        assert!(st.ready);
        assert_eq!(st.phase, Phase::Idle);
    }

    #[test]
    fn config_is_latched_at_start() {
        let mut st = CoreState::reset();
        let (ns, _) = xtea_step(st, core_in(true, true, 32, [0x4142_4344, 0x4546_4748]));
        st = ns;

        // flip direction and round count mid-flight, keep pulsing next
        let noisy = core_in(true, false, 3, [0x4142_4344, 0x4546_4748]);
        let mut steps = 0;
        let mut inp = noisy;
        while !st.ready {
            let (ns, _) = xtea_step(st, inp);
            st = ns;
            steps += 1;
            if steps == 1 {
                // the block is sampled in Init only
                inp.block = [w32(0), w32(0)];
            }
        }

        assert_eq!(steps, 65);
        assert_eq!((u32_of(st.v0), u32_of(st.v1)), (0x497d_f3d0, 0x7261_2cb5));
    }

    #[test]
    fn result_is_held_while_idle() {
        let mut st = CoreState::reset();
        let mut inp = core_in(true, true, 1, [3, 4]);
        loop {
            let (ns, _) = xtea_step(st, inp);
            st = ns;
            inp.next = false;
            if st.ready {
                break;
            }
        }
        let held = st.result();

        let (_, out) = xtea_step(st, core_in(false, false, 9, [0, 0]));
        assert!(out.ready);
        assert_eq!(u32_of(out.result[0]), u32_of(held[0]));
        assert_eq!(u32_of(out.result[1]), u32_of(held[1]));
    }
}
