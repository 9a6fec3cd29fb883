use rand::Rng;

use crate::models::{Protocol, ProtocolMetrics};

/// Immutable set of protocols the strategy may allocate to.
#[derive(Debug, Clone)]
pub struct ProtocolCatalog {
    protocols: Vec<Protocol>,
}

impl ProtocolCatalog {
    pub fn new(protocols: Vec<Protocol>) -> Self {
        Self { protocols }
    }

    pub fn all(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn find(&self, name: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.name == name)
    }

    /// Uniformly random entry, `None` only for an empty catalog.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Protocol> {
        if self.protocols.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.protocols.len());
        self.protocols.get(idx)
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

impl Default for ProtocolCatalog {
    fn default() -> Self {
        Self::new(vec![
            Protocol {
                name: "Aave V3".into(),
                chain: "Ethereum".into(),
                chain_id: 1,
                apy: 5.2,
                pgs: 1.2,
                weighted_apy: 6.24,
                is_active: true,
                protocol_address: "0x87870Bca3F236dC72f344005bF9C4021A6E358A1".into(),
                metrics: ProtocolMetrics {
                    is_open_source: true,
                    has_grants_program: true,
                    is_governed_by_dao: true,
                    public_goods_treasury_percentage: 15,
                },
            },
            Protocol {
                name: "Spark".into(),
                chain: "Arbitrum".into(),
                chain_id: 42161,
                apy: 4.8,
                pgs: 1.5,
                weighted_apy: 7.2,
                is_active: true,
                protocol_address: "0x93091E89f6562C256e3C4633740E6E5764C92B7F".into(),
                metrics: ProtocolMetrics {
                    is_open_source: true,
                    has_grants_program: true,
                    is_governed_by_dao: true,
                    public_goods_treasury_percentage: 20,
                },
            },
            Protocol {
                name: "Compound".into(),
                chain: "Ethereum".into(),
                chain_id: 1,
                apy: 4.5,
                pgs: 1.1,
                weighted_apy: 4.95,
                is_active: true,
                protocol_address: "0x3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B".into(),
                metrics: ProtocolMetrics {
                    is_open_source: true,
                    has_grants_program: false,
                    is_governed_by_dao: true,
                    public_goods_treasury_percentage: 10,
                },
            },
            Protocol {
                name: "Morpho".into(),
                chain: "Optimism".into(),
                chain_id: 10,
                apy: 6.1,
                pgs: 0.95,
                // Pre-baked figure, intentionally not apy * pgs.
                weighted_apy: 5.795,
                is_active: true,
                protocol_address: "0xBBBBBbbBBb9cC5e90e3b3Af64bdAF62C37AFFFF3".into(),
                metrics: ProtocolMetrics {
                    is_open_source: true,
                    has_grants_program: true,
                    is_governed_by_dao: false,
                    public_goods_treasury_percentage: 5,
                },
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = ProtocolCatalog::default();
        assert_eq!(catalog.len(), 4);
        let spark = catalog.find("Spark").unwrap();
        assert_eq!(spark.chain, "Arbitrum");
        assert_eq!(spark.chain_id, 42161);
        assert_eq!(spark.metrics.public_goods_treasury_percentage, 20);
    }

    #[test]
    fn test_find_is_exact() {
        let catalog = ProtocolCatalog::default();
        assert!(catalog.find("spark").is_none());
        assert!(catalog.find("Uniswap").is_none());
    }

    #[test]
    fn test_pick_stays_in_catalog() {
        let catalog = ProtocolCatalog::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = catalog.pick(&mut rng).unwrap();
            assert!(catalog.find(&picked.name).is_some());
        }
    }

    #[test]
    fn test_pick_from_empty_catalog() {
        let catalog = ProtocolCatalog::new(vec![]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(catalog.pick(&mut rng).is_none());
    }
}
