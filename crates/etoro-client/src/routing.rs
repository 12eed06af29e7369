//! Demo/real path routing for trading endpoints.
//!
//! Trading execution and trading info live under separate namespaces per
//! environment:
//!
//! | mode | execution                      | info                      |
//! |------|--------------------------------|---------------------------|
//! | demo | `/trading/execution/demo{sub}` | `/trading/info/demo{sub}` |
//! | real | `/trading/execution{sub}`      | `/trading/info{sub}`      |

use crate::config::TradingMode;

const EXECUTION_NAMESPACE: &str = "/trading/execution";
const INFO_NAMESPACE: &str = "/trading/info";

/// Resolve a trading-execution sub-path for `mode`.
///
/// ```
/// use etoro_client::{routing::execution_path, TradingMode};
///
/// assert_eq!(
///     execution_path(TradingMode::Demo, "/market-open-orders/by-amount"),
///     "/trading/execution/demo/market-open-orders/by-amount"
/// );
/// assert_eq!(
///     execution_path(TradingMode::Real, "/market-open-orders/by-amount"),
///     "/trading/execution/market-open-orders/by-amount"
/// );
/// ```
pub fn execution_path(mode: TradingMode, sub_path: &str) -> String {
    namespaced(EXECUTION_NAMESPACE, mode, sub_path)
}

/// Resolve a trading-info sub-path for `mode`.
pub fn info_path(mode: TradingMode, sub_path: &str) -> String {
    namespaced(INFO_NAMESPACE, mode, sub_path)
}

fn namespaced(namespace: &str, mode: TradingMode, sub_path: &str) -> String {
    match mode {
        TradingMode::Demo => format!("{namespace}/demo{sub_path}"),
        TradingMode::Real => format!("{namespace}{sub_path}"),
    }
}

impl TradingMode {
    /// See [`execution_path`].
    pub fn execution_path(self, sub_path: &str) -> String {
        execution_path(self, sub_path)
    }

    /// See [`info_path`].
    pub fn info_path(self, sub_path: &str) -> String {
        info_path(self, sub_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB_PATHS: &[&str] = &[
        "/portfolio",
        "/market-open-orders/by-units",
        "/market-close-orders/positions/42",
        "",
    ];

    #[test]
    fn test_info_path_demo() {
        assert_eq!(
            info_path(TradingMode::Demo, "/portfolio"),
            "/trading/info/demo/portfolio"
        );
    }

    #[test]
    fn test_info_path_real() {
        assert_eq!(
            info_path(TradingMode::Real, "/portfolio"),
            "/trading/info/portfolio"
        );
    }

    #[test]
    fn test_demo_segment_follows_namespace() {
        for sub in SUB_PATHS {
            let exec = execution_path(TradingMode::Demo, sub);
            let info = info_path(TradingMode::Demo, sub);
            assert!(exec.starts_with("/trading/execution/demo"), "{exec}");
            assert!(info.starts_with("/trading/info/demo"), "{info}");
        }
    }

    #[test]
    fn test_real_never_contains_demo() {
        for sub in SUB_PATHS {
            assert!(!execution_path(TradingMode::Real, sub).contains("/demo"));
            assert!(!info_path(TradingMode::Real, sub).contains("/demo"));
        }
    }

    #[test]
    fn test_routing_is_deterministic() {
        for mode in [TradingMode::Demo, TradingMode::Real] {
            for sub in SUB_PATHS {
                assert_eq!(execution_path(mode, sub), execution_path(mode, sub));
                assert_eq!(info_path(mode, sub), mode.info_path(sub));
            }
        }
    }
}
