/**
 * Login Gateway State
 *
 * The gateway is stateless between requests; handlers share only the
 * `LoginService` (HTTP client plus token issuer), which is cheap to clone.
 */

use crate::gateway::login::LoginService;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub login: LoginService,
}

impl GatewayState {
    pub fn new(login: LoginService) -> Self {
        Self { login }
    }
}
