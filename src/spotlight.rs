use rand::seq::index;
use rand::Rng;

use crate::types::ClanRecord;

/// Clans featured on the home page
pub const SPOTLIGHT_SIZE: usize = 16;

/// Pick up to `size` distinct clans in random order.
///
/// Draws a random index permutation prefix, so each record appears at most
/// once and is returned unmodified.
pub fn sample<'a, R: Rng + ?Sized>(
    clans: &'a [ClanRecord],
    size: usize,
    rng: &mut R,
) -> Vec<&'a ClanRecord> {
    let amount = size.min(clans.len());
    index::sample(rng, clans.len(), amount)
        .into_iter()
        .map(|i| &clans[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn clans(n: usize) -> Vec<ClanRecord> {
        (0..n)
            .map(|i| ClanRecord::new(format!("Clan{}", i), &["line"]))
            .collect()
    }

    #[test]
    fn sample_size_is_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample(&clans(40), SPOTLIGHT_SIZE, &mut rng).len(), 16);
        assert_eq!(sample(&clans(5), SPOTLIGHT_SIZE, &mut rng).len(), 5);
        assert!(sample(&clans(0), SPOTLIGHT_SIZE, &mut rng).is_empty());
    }

    #[test]
    fn sample_is_distinct_subset() {
        let source = clans(30);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = sample(&source, SPOTLIGHT_SIZE, &mut rng);
        let unique: HashSet<&str> = picked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(unique.len(), picked.len());
        for clan in picked {
            assert!(source.contains(clan));
        }
    }

    #[test]
    fn seeded_sampling_repeats() {
        let source = clans(30);
        let a = sample(&source, SPOTLIGHT_SIZE, &mut StdRng::seed_from_u64(3));
        let b = sample(&source, SPOTLIGHT_SIZE, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
