// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A source of uniformly distributed 32-bit values.
///
/// The quiz engine takes one of these instead of reaching for ambient
/// randomness, so that tests can pin the shuffle with a seed.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in the range `[0, max)`, without modulo bias.
    ///
    /// Returns zero when `max` is zero.
    fn below(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Values under `threshold` would over-represent the low residues.
        let threshold = max.wrapping_neg() % max;
        loop {
            let value = self.next_u32();
            if value >= threshold {
                return value % max;
            }
        }
    }
}

/// A minimal, zero-dependency, completely insecure PRNG to shuffle the questions.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for TinyRng {
    fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }
}

/// Fisher-Yates shuffle: every permutation is equally likely.
pub fn shuffle<T, R: RandomSource + ?Sized>(v: Vec<T>, rng: &mut R) -> Vec<T> {
    let mut v = v;
    for i in (1..v.len()).rev() {
        let j = rng.below((i + 1) as u32) as usize;
        v.swap(i, j);
    }
    v
}
