//! # Validator Selection Distribution
//!
//! Statistical checks of stake-weighted selection through the registry,
//! driven by a seeded random source.

#[cfg(test)]
mod tests {
    use ec_03_registry::{NodeProfile, NodeRegistry};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn registry_with_stakes(stakes: &[u64]) -> NodeRegistry {
        let registry = NodeRegistry::new();
        for (i, &stake) in stakes.iter().enumerate() {
            registry
                .add(
                    format!("node-{i}"),
                    NodeProfile {
                        stake,
                        metadata: None,
                    },
                    1_000,
                )
                .unwrap();
        }
        registry
    }

    fn selection_shares(registry: &NodeRegistry, trials: u32, seed: u64) -> HashMap<String, f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..trials {
            let picked = registry.select_validator(&mut rng).unwrap();
            *counts.entry(picked.id).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(id, count)| (id, count as f64 / trials as f64))
            .collect()
    }

    #[test]
    fn test_zero_stake_fallback_is_uniform() {
        let registry = registry_with_stakes(&[0, 0, 0, 0, 0]);
        let shares = selection_shares(&registry, 20_000, 99);

        // Each of the 5 nodes lands near 1/5
        assert_eq!(shares.len(), 5);
        for (id, share) in shares {
            assert!(
                (share - 0.2).abs() < 0.02,
                "{id} selected with share {share}"
            );
        }
    }

    #[test]
    fn test_selection_proportional_to_stake() {
        let registry = registry_with_stakes(&[600, 300, 100]);
        let shares = selection_shares(&registry, 20_000, 123);

        assert!((shares["node-0"] - 0.6).abs() < 0.03);
        assert!((shares["node-1"] - 0.3).abs() < 0.03);
        assert!((shares["node-2"] - 0.1).abs() < 0.03);
    }

    #[test]
    fn test_selection_adapts_after_leave() {
        let registry = registry_with_stakes(&[500, 500]);
        registry.remove(&"node-0".to_string());

        let shares = selection_shares(&registry, 1_000, 5);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares["node-1"], 1.0);
    }
}
