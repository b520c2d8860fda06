use std::sync::LazyLock;

use regex::Regex;

static MINING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\bpow\b|proof.of.work|mining|miner|hashrate|hash.rate",
        r"|cpu.min|gpu.min|asic.resist|fair.launch|no.premine|block.reward",
        r"|mine?able",
        r"|RandomX|KawPow|ProgPoW|Equihash|Autolykos|kHeavyHash|CryptoNight",
        r"|MinotaurX|Verthash|FishHash|zkPoW|BeamHash|YesPoWer|SpectreX",
        r"|Ethash|\bScrypt\b|SHA.?256d?|Cuckoo|Blake3|Keccak.?256|Argon2",
        r"|stratum|solo.min|pool.min",
    ))
    .unwrap()
});

// Promotional posts love to name-drop mining terms.
static EXCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)trading|bot|assistant|DeFi|swap|lending|staking|NFT|token sale",
        r"|presale|IDO|IEO|launchpad|airdrop|generosity|charity",
    ))
    .unwrap()
});

/// Whether a thread title announces a mineable coin. Exclusions win.
pub fn is_mining(title: &str) -> bool {
    !EXCLUDE.is_match(title) && MINING.is_match(title)
}

#[cfg(test)]
mod tests {
    use super::is_mining;

    #[test]
    fn inclusion() {
        assert!(is_mining("New ASIC-resistant RandomX coin, fair launch"));
        assert!(is_mining("[ANN] Foo | PoW | CPU mining | no premine"));
        assert!(is_mining("Bar: Scrypt merged mining"));
        assert!(is_mining("Baz - kheavyhash GPU mineable"));
    }

    #[test]
    fn exclusion_overrides() {
        assert!(!is_mining("RandomX trading bot airdrop"));
        assert!(!is_mining("PoW token PRESALE is live"));
        assert!(!is_mining("Mining rewards via staking"));
    }

    #[test]
    fn unrelated() {
        assert!(!is_mining("[ANN] New layer-2 wallet"));
        assert!(!is_mining("Powerful governance platform"));
        assert!(!is_mining(""));
    }
}
