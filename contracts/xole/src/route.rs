//! Exchange router interface and route validation.

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{contractclient, Address, Bytes, Env};
use xole_errors::XoleError;

use crate::types::{RouteKind, SwapRoute};

/// External swap capability. `route` is the XDR encoding of a `SwapRoute`.
/// The router must already hold `amount_in` of the first hop token and
/// delivers the last hop token to `to`.
#[contractclient(name = "ExchangeRouterClient")]
pub trait ExchangeRouter {
    fn swap(env: Env, route: Bytes, amount_in: i128, min_amount_out: i128, to: Address) -> i128;
}

#[must_use]
pub fn encode(e: &Env, route: &SwapRoute) -> Bytes {
    route.clone().to_xdr(e)
}

/// True for the single-element `[share_token]` route.
#[must_use]
pub fn is_identity(route: &SwapRoute, share_token: &Address) -> bool {
    route.path.len() == 1 && route.path.first().as_ref() == Some(share_token)
}

/// Checks that `route` spends `from_token` and ends in `share_token`.
pub fn validate(
    route: &SwapRoute,
    from_token: &Address,
    share_token: &Address,
) -> Result<(), XoleError> {
    let first = route.path.first().ok_or(XoleError::InvalidRoute)?;
    let last = route.path.last().ok_or(XoleError::InvalidRoute)?;
    if first != *from_token || last != *share_token {
        return Err(XoleError::InvalidRoute);
    }

    if from_token == share_token {
        // Share token is converted in place.
        return if route.path.len() == 1 {
            Ok(())
        } else {
            Err(XoleError::InvalidRoute)
        };
    }

    let hops_ok = match route.kind {
        RouteKind::Direct => route.path.len() == 2,
        RouteKind::MultiHop => route.path.len() >= 2,
    };
    if !hops_ok {
        return Err(XoleError::InvalidRoute);
    }

    for i in 1..route.path.len() {
        if route.path.get(i) == route.path.get(i - 1) {
            return Err(XoleError::InvalidRoute);
        }
    }
    Ok(())
}
