//! Network generators and templates

/// Simple generators to test functionality
pub mod testcases {
    use crate::Network;

    /// A chain of And gates, each one feeding the next together with a fresh input
    pub fn and_chain(len: usize) -> Network {
        assert!(len > 0);
        let mut ret = Network::new();
        let mut x = ret.add_input();
        for _ in 0..len {
            let i = ret.add_input();
            x = ret.and(x, i);
        }
        ret.add_output(x);
        ret.check();
        ret
    }

    /// A diamond: an And and a Xor over the same two inputs, recombined by an And
    pub fn diamond() -> Network {
        let mut ret = Network::new();
        let i0 = ret.add_input();
        let i1 = ret.add_input();
        let a = ret.and(i0, i1);
        let x = ret.xor(i0, i1);
        let top = ret.and(a, x);
        ret.add_output(top);
        ret.check();
        ret
    }
}

/// Random network generation
pub mod random {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::Network;

    /// Generate a random Xor-And graph with the given size
    ///
    /// Each gate picks two distinct earlier signals, with random gate type and
    /// random input inversions. Every gate that feeds no other gate becomes a
    /// primary output, so that the network has no dead logic.
    pub fn xag(nb_inputs: usize, nb_gates: usize, seed: u64) -> Network {
        assert!(nb_inputs >= 2);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Network::new();
        let mut sigs = Vec::new();
        for _ in 0..nb_inputs {
            sigs.push(ret.add_input());
        }
        let mut used = vec![true; nb_inputs];
        for _ in 0..nb_gates {
            let a = rng.gen_range(0..sigs.len());
            let mut b = rng.gen_range(0..sigs.len() - 1);
            if b >= a {
                b += 1;
            }
            let sa = sigs[a] ^ rng.gen::<bool>();
            let sb = sigs[b] ^ rng.gen::<bool>();
            let s = if rng.gen() {
                ret.and(sa, sb)
            } else {
                ret.xor(sa, sb)
            };
            used[a] = true;
            used[b] = true;
            used.push(false);
            sigs.push(s);
        }
        for (i, s) in sigs.iter().enumerate() {
            if !used[i] && s.is_var() {
                ret.add_output(*s);
            }
        }
        ret.check();
        ret
    }

}
