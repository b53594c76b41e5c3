//! Exchange endpoint catalog
//!
//! Maps a canonical [`Pair`] to every exchange's native symbol and public
//! depth URL. No I/O happens here.

use crate::types::{Exchange, Pair};

/// Bitfinex only offers the fixed book lengths 1, 25 and 100.
const BITFINEX_BOOK_LEN: u32 = 100;
const OKX_BOOK_SIZE: u32 = 400;
const GATE_BOOK_LIMIT: u32 = 1000;

impl Exchange {
    pub fn base_url(&self) -> &'static str {
        match self {
            Exchange::Binance => "https://api.binance.com",
            Exchange::Bitfinex => "https://api-pub.bitfinex.com",
            Exchange::Kucoin => "https://api.kucoin.com",
            Exchange::Okx => "https://www.okx.com",
            Exchange::Gate => "https://api.gateio.ws",
            Exchange::Huobi => "https://api.huobi.pro",
            Exchange::Mexc => "https://api.mexc.com",
        }
    }

    /// The pair in this exchange's native symbol format.
    pub fn symbol(&self, pair: &Pair) -> String {
        let (base, quote) = (pair.base(), pair.quote());
        match self {
            Exchange::Binance | Exchange::Mexc => format!("{}{}", base, quote),
            Exchange::Kucoin | Exchange::Okx => format!("{}-{}", base, quote),
            Exchange::Gate => format!("{}_{}", base, quote),
            Exchange::Huobi => format!("{}{}", base, quote).to_lowercase(),
            Exchange::Bitfinex => {
                // Tether books are listed against USD
                let quote = if quote == "USDT" { "USD" } else { quote };
                if base.len() == 3 && quote.len() == 3 {
                    format!("t{}{}", base, quote)
                } else {
                    format!("t{}:{}", base, quote)
                }
            }
        }
    }

    /// Path and query of the public depth endpoint, relative to the base URL.
    pub fn depth_path(&self, pair: &Pair, limit: u32) -> String {
        let symbol = self.symbol(pair);
        match self {
            Exchange::Binance => format!("/api/v3/depth?symbol={}&limit={}", symbol, limit),
            Exchange::Bitfinex => format!("/v2/book/{}/P0?len={}", symbol, BITFINEX_BOOK_LEN),
            Exchange::Kucoin => format!("/api/v1/market/orderbook/level2_100?symbol={}", symbol),
            Exchange::Okx => format!("/api/v5/market/books?instId={}&sz={}", symbol, OKX_BOOK_SIZE),
            Exchange::Gate => format!(
                "/api/v4/spot/order_book?currency_pair={}&limit={}",
                symbol, GATE_BOOK_LIMIT
            ),
            Exchange::Huobi => format!("/market/depth?symbol={}&type=step0", symbol),
            Exchange::Mexc => format!("/api/v3/depth?symbol={}&limit={}", symbol, limit),
        }
    }

    pub fn depth_url(&self, pair: &Pair, limit: u32) -> String {
        format!("{}{}", self.base_url(), self.depth_path(pair, limit))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub exchange: Exchange,
    pub url: String,
}

/// Depth endpoint per exchange for one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCatalog {
    endpoints: Vec<Endpoint>,
}

impl EndpointCatalog {
    /// Catalog for every given exchange using its public API host.
    pub fn for_pair(pair: &Pair, exchanges: &[Exchange], depth_limit: u32) -> Self {
        let endpoints = exchanges
            .iter()
            .map(|exchange| Endpoint {
                exchange: *exchange,
                url: exchange.depth_url(pair, depth_limit),
            })
            .collect();
        Self { endpoints }
    }

    /// Catalog from explicit URLs, e.g. a mirror or a local mock server.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Exchange, S)>,
        S: Into<String>,
    {
        let endpoints = entries
            .into_iter()
            .map(|(exchange, url)| Endpoint {
                exchange,
                url: url.into(),
            })
            .collect();
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn url(&self, exchange: Exchange) -> Option<&str> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.exchange == exchange)
            .map(|endpoint| endpoint.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn btc_usdt() -> Pair {
        "btc_usdt".parse().unwrap()
    }

    #[test]
    fn symbols_follow_each_exchange_format() {
        let pair = btc_usdt();
        assert_eq!(Exchange::Binance.symbol(&pair), "BTCUSDT");
        assert_eq!(Exchange::Bitfinex.symbol(&pair), "tBTCUSD");
        assert_eq!(Exchange::Kucoin.symbol(&pair), "BTC-USDT");
        assert_eq!(Exchange::Okx.symbol(&pair), "BTC-USDT");
        assert_eq!(Exchange::Gate.symbol(&pair), "BTC_USDT");
        assert_eq!(Exchange::Huobi.symbol(&pair), "btcusdt");
        assert_eq!(Exchange::Mexc.symbol(&pair), "BTCUSDT");
    }

    #[test]
    fn bitfinex_uses_colon_for_long_symbols() {
        let pair: Pair = "DOGE_USDT".parse().unwrap();
        assert_eq!(Exchange::Bitfinex.symbol(&pair), "tDOGE:USD");
        let pair: Pair = "ETH_BTC".parse().unwrap();
        assert_eq!(Exchange::Bitfinex.symbol(&pair), "tETHBTC");
    }

    #[test]
    fn urls_carry_required_parameters() {
        let pair = btc_usdt();
        assert_eq!(
            Exchange::Binance.depth_url(&pair, 100),
            "https://api.binance.com/api/v3/depth?symbol=BTCUSDT&limit=100"
        );
        assert_eq!(
            Exchange::Bitfinex.depth_url(&pair, 100),
            "https://api-pub.bitfinex.com/v2/book/tBTCUSD/P0?len=100"
        );
        assert_eq!(
            Exchange::Kucoin.depth_url(&pair, 100),
            "https://api.kucoin.com/api/v1/market/orderbook/level2_100?symbol=BTC-USDT"
        );
        assert_eq!(
            Exchange::Okx.depth_url(&pair, 100),
            "https://www.okx.com/api/v5/market/books?instId=BTC-USDT&sz=400"
        );
        assert_eq!(
            Exchange::Gate.depth_url(&pair, 100),
            "https://api.gateio.ws/api/v4/spot/order_book?currency_pair=BTC_USDT&limit=1000"
        );
        assert_eq!(
            Exchange::Huobi.depth_url(&pair, 100),
            "https://api.huobi.pro/market/depth?symbol=btcusdt&type=step0"
        );
        assert_eq!(
            Exchange::Mexc.depth_url(&pair, 50),
            "https://api.mexc.com/api/v3/depth?symbol=BTCUSDT&limit=50"
        );
    }

    #[test]
    fn catalog_covers_requested_exchanges_only() {
        let catalog = EndpointCatalog::for_pair(&btc_usdt(), &[Exchange::Okx, Exchange::Huobi], 100);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.url(Exchange::Okx).is_some());
        assert!(catalog.url(Exchange::Binance).is_none());
    }

    #[test]
    fn catalog_from_entries_keeps_urls() {
        let catalog = EndpointCatalog::from_entries([(Exchange::Gate, "http://127.0.0.1:1/gate")]);
        assert_eq!(catalog.url(Exchange::Gate), Some("http://127.0.0.1:1/gate"));
    }

    proptest! {
        #[test]
        fn distinct_pairs_never_share_a_url(
            base_a in "[A-Z0-9]{3}",
            base_b in "[A-Z0-9]{3}",
            quote_a in prop::sample::select(vec!["USDT", "BTC", "ETH", "EUR"]),
            quote_b in prop::sample::select(vec!["USDT", "BTC", "ETH", "EUR"]),
        ) {
            let a = Pair::new(&base_a, quote_a).unwrap();
            let b = Pair::new(&base_b, quote_b).unwrap();
            prop_assume!(a != b);
            for exchange in Exchange::ALL {
                prop_assert_ne!(exchange.depth_url(&a, 100), exchange.depth_url(&b, 100));
            }
        }

        #[test]
        fn urls_always_embed_the_symbol(base in "[A-Za-z0-9]{2,6}", quote in "[A-Za-z0-9]{3,5}") {
            let pair = Pair::new(&base, &quote).unwrap();
            for exchange in Exchange::ALL {
                let url = exchange.depth_url(&pair, 100);
                prop_assert!(url.starts_with(exchange.base_url()));
                prop_assert!(url.contains(&exchange.symbol(&pair)));
            }
        }
    }
}
