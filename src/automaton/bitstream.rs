//! Bit-stream generation driven by a self-driving automaton.
//!
//! A self-driving automaton produces its output by repeatedly feeding its own
//! prior output back in as the driving input: whenever the read cursor runs
//! off the end of the materialized buffer, the automaton re-walks the whole
//! buffer from state 0 and emits the label of every state it lands on,
//! producing a strictly longer buffer.

use crate::schema::SdaGenome;

/// Runtime bit-generation state for one [`SdaGenome`].
///
/// The genome is the fixed program; `BitStream` owns the mutable cursor and
/// output buffer. Constructing a fresh stream (or calling [`reset`]) makes
/// generation deterministic from the genome alone, so independent
/// evaluations never see each other's read position.
///
/// [`reset`]: BitStream::reset
#[derive(Debug)]
pub struct BitStream<'a> {
    genome: &'a SdaGenome,
    buffer: Vec<u8>,
    cursor: usize,
    emitted: u64,
}

impl<'a> BitStream<'a> {
    /// Create a stream positioned at the start of `emit[0]`.
    pub fn new(genome: &'a SdaGenome) -> Self {
        let mut stream = Self {
            genome,
            buffer: Vec::new(),
            cursor: 0,
            emitted: 0,
        };
        stream.reset();
        stream
    }

    /// Rewind to the initial buffer `emit[0]` and clear all counters.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.buffer.extend_from_slice(self.genome.emit(0).bits());
        self.cursor = 0;
        self.emitted = 0;
    }

    /// One self-referential growth step: walk the automaton from state 0
    /// driven by the current buffer, appending the label of each destination
    /// state to a new buffer seeded with `emit[0]`.
    ///
    /// Labels are non-empty, so the replacement buffer is strictly longer
    /// than the one that drove it.
    fn expand(&mut self) {
        let genome = self.genome;
        let mut next: Vec<u8> = genome.emit(0).bits().to_vec();
        next.reserve(self.buffer.len() * 2);
        let mut state = 0;
        for &bit in &self.buffer {
            state = genome.transition(state, bit);
            next.extend_from_slice(genome.emit(state).bits());
        }
        self.buffer = next;
    }

    /// Produce the next bit (0 or 1).
    ///
    /// When the cursor has consumed the whole buffer it wraps to position 0
    /// *before* the expansion, so the next bit read comes from the head of
    /// the newly grown buffer, not from just past the old end. The wrap is
    /// observable (the head repeats `emit[0]`) and is part of the contract.
    pub fn next_bit(&mut self) -> u8 {
        if self.cursor >= self.buffer.len() {
            self.cursor = 0;
            self.expand();
        }
        let bit = self.buffer[self.cursor];
        self.cursor += 1;
        self.emitted += 1;
        bit
    }

    /// Produce the next `n` bits in generation order.
    ///
    /// The cursor advances; calling again continues the stream unless
    /// [`reset`](BitStream::reset) is invoked in between.
    pub fn next_bits(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.next_bit()).collect()
    }

    /// The genome driving this stream.
    pub fn genome(&self) -> &SdaGenome {
        self.genome
    }

    /// Lifetime count of bits emitted since the last reset.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Length of the currently materialized buffer.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Label;

    fn four_state() -> SdaGenome {
        SdaGenome::new(
            vec![Label::Zero, Label::One, Label::ZeroZero, Label::OneOne],
            vec![[1, 2], [3, 0], [0, 1], [2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_reference_sequence() {
        // Hand-simulated: the buffer grows 0 -> 01 -> 010 -> 0101.
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        assert_eq!(stream.next_bits(10), vec![0, 0, 1, 0, 1, 0, 0, 1, 0, 1]);
        assert_eq!(stream.buffer_len(), 4);
        assert_eq!(stream.emitted(), 10);
    }

    #[test]
    fn test_reset_determinism() {
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        let first = stream.next_bits(50);
        stream.reset();
        let second = stream.next_bits(50);
        assert_eq!(first, second);

        let mut fresh = BitStream::new(&genome);
        assert_eq!(fresh.next_bits(50), first);
    }

    #[test]
    fn test_missing_reset_continues_stream() {
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        let all = stream.next_bits(20);
        stream.reset();
        let head = stream.next_bits(10);
        let tail = stream.next_bits(10);
        assert_eq!(head, all[..10]);
        assert_eq!(tail, all[10..]);
    }

    #[test]
    fn test_wrap_then_expand() {
        // emit[0] has length 1: the first call drains the seed buffer, the
        // second triggers exactly one expansion and reads position 0 of the
        // grown buffer.
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        assert_eq!(stream.buffer_len(), 1);
        assert_eq!(stream.next_bit(), 0);
        assert_eq!(stream.buffer_len(), 1);
        assert_eq!(stream.next_bit(), 0); // head of "01", not past the old end
        assert_eq!(stream.buffer_len(), 2);
    }

    #[test]
    fn test_expansion_strictly_grows() {
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        let mut lengths = vec![stream.buffer_len()];
        for _ in 0..200 {
            stream.next_bit();
            let len = stream.buffer_len();
            if len != *lengths.last().unwrap() {
                lengths.push(len);
            }
        }
        assert!(lengths.len() >= 4);
        assert!(lengths.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_two_bit_seed_label() {
        // emit[0] of width 2 seeds a two-bit buffer.
        let genome = SdaGenome::new(
            vec![Label::OneZero, Label::One],
            vec![[1, 1], [0, 0]],
        )
        .unwrap();
        let mut stream = BitStream::new(&genome);
        assert_eq!(stream.buffer_len(), 2);
        assert_eq!(stream.next_bits(2), vec![1, 0]);
        // Expansion walks "10": 0 --1--> 1 emits "1", 1 --0--> 0 emits "10".
        assert_eq!(stream.next_bits(5), vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_bits_are_binary() {
        let genome = four_state();
        let mut stream = BitStream::new(&genome);
        assert!(stream.next_bits(200).iter().all(|&b| b <= 1));
    }
}
