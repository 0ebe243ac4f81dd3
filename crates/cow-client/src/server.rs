use url::Url;

/// The known deployments of the CoW Protocol orderbook.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum CowServer {
    MainnetProd,
    MainnetStaging,
    GnosisProd,
    #[default]
    GnosisStaging,
    SepoliaProd,
    SepoliaStaging,
    ArbitrumOneProd,
    ArbitrumOneStaging,
    BaseProd,
    BaseStaging,
}

impl CowServer {
    /// The network segment of the orderbook url.
    pub fn network(self) -> &'static str {
        match self {
            Self::MainnetProd | Self::MainnetStaging => "mainnet",
            Self::GnosisProd | Self::GnosisStaging => "xdai",
            Self::SepoliaProd | Self::SepoliaStaging => "sepolia",
            Self::ArbitrumOneProd | Self::ArbitrumOneStaging => "arbitrum_one",
            Self::BaseProd | Self::BaseStaging => "base",
        }
    }

    pub fn chain_id(self) -> u64 {
        match self {
            Self::MainnetProd | Self::MainnetStaging => 1,
            Self::GnosisProd | Self::GnosisStaging => 100,
            Self::SepoliaProd | Self::SepoliaStaging => 11155111,
            Self::ArbitrumOneProd | Self::ArbitrumOneStaging => 42161,
            Self::BaseProd | Self::BaseStaging => 8453,
        }
    }

    /// Staging ("barn") deployments run the latest orderbook release against
    /// the same chain as production.
    pub fn is_staging(self) -> bool {
        matches!(
            self,
            Self::MainnetStaging
                | Self::GnosisStaging
                | Self::SepoliaStaging
                | Self::ArbitrumOneStaging
                | Self::BaseStaging
        )
    }

    pub fn base_url(self) -> Result<Url, url::ParseError> {
        let host = if self.is_staging() {
            "https://barn.api.cow.fi"
        } else {
            "https://api.cow.fi"
        };
        Url::parse(&format!("{host}/{}/", self.network()))
    }
}
