use super::NetworkProvider;
use net_provider_noop::NetworkProviderNoop;
use std::sync::Arc;

#[cfg(feature = "reqwest")]
pub mod net_provider_reqwest;

mod net_provider_noop;

lazy_static::lazy_static! {
    static ref NOOP_NETWORK_PROVIDER: Arc<dyn NetworkProvider> = Arc::new(NetworkProviderNoop {});
}

#[cfg(feature = "reqwest")]
lazy_static::lazy_static! {
    static ref REQWEST_NETWORK_PROVIDER: Arc<dyn NetworkProvider> =
        Arc::new(net_provider_reqwest::NetworkProviderReqwest::new());
}

#[cfg(feature = "reqwest")]
pub fn get_network_provider(disable_network: bool) -> Arc<dyn NetworkProvider> {
    if disable_network {
        return NOOP_NETWORK_PROVIDER.clone();
    }

    REQWEST_NETWORK_PROVIDER.clone()
}

#[cfg(not(feature = "reqwest"))]
pub fn get_network_provider(_disable_network: bool) -> Arc<dyn NetworkProvider> {
    NOOP_NETWORK_PROVIDER.clone()
}
