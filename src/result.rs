//! Provider-agnostic sign-up results and the assembler that builds them.

pub mod delivery;

pub use delivery::*;

// self
use crate::{
	_prelude::*,
	auth::{UserSub, Username},
	error::UnexpectedError,
	provider::SignUpResponse,
};

/// Step the caller must take after a sign-up call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignUpStep {
	/// The account must be confirmed with the delivered verification code.
	ConfirmSignUpStep,
	/// Registration is complete.
	Done,
}

/// Next step plus whatever the caller needs to perform it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSignUpStep {
	/// The required step.
	pub step: SignUpStep,
	/// Step parameters; currently always empty.
	pub additional_info: BTreeMap<String, String>,
	/// Delivery details of the verification code, when one was sent.
	pub code_delivery_details: Option<CodeDeliveryDetails>,
}

/// Registered user identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
	/// Provider-issued subject identifier.
	pub user_id: UserSub,
	/// Username exactly as the caller supplied it.
	pub username: Username,
}

/// Terminal outcome of a successful sign-up call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpResult {
	/// Whether the provider reported the account as confirmed.
	pub is_sign_up_complete: bool,
	/// What the caller must do next.
	pub next_step: NextSignUpStep,
	/// The registered user.
	pub user: AuthUser,
}
impl SignUpResult {
	/// Translates a provider response into a result for `username`.
	///
	/// A confirmed account yields [`SignUpStep::Done`] (delivery details pass through when
	/// present); otherwise [`SignUpStep::ConfirmSignUpStep`] with the mapped details. The
	/// username in the result is the caller's, never the provider's echo.
	pub fn assemble(response: &SignUpResponse, username: &Username) -> Result<Self> {
		let user_id = UserSub::new(&response.user_sub).map_err(|e| {
			UnexpectedError::ResponseMapping { reason: format!("UserSub is invalid: {e}") }
		})?;
		let step =
			if response.user_confirmed { SignUpStep::Done } else { SignUpStep::ConfirmSignUpStep };
		let code_delivery_details =
			response.code_delivery_details.as_ref().map(CodeDeliveryDetails::from_provider);

		Ok(Self {
			is_sign_up_complete: response.user_confirmed,
			next_step: NextSignUpStep {
				step,
				additional_info: BTreeMap::new(),
				code_delivery_details,
			},
			user: AuthUser { user_id, username: username.clone() },
		})
	}
}
