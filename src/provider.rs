//! Identity-provider contract (behavior), wire shapes (data), and rejection taxonomy.
//!
//! `wire` holds the JSON request/response structures user pools exchange for `SignUp`.
//! `error` defines [`ProviderError`], the provider's explicit refusal of a request,
//! classified into [`ProviderErrorKind`]. [`IdentityProvider`] is the only seam between
//! the sign-up operation and any particular transport.

pub mod error;
pub mod wire;

pub use error::*;
pub use wire::*;

// self
use crate::_prelude::*;

/// Boxed future returned by [`IdentityProvider`] calls.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Remote user directory capable of registering new users.
///
/// Implementations are long-lived and shared: the sign-up operation holds them behind an
/// [`Arc`], may call them from many operations at once, and never closes them.
/// Provider refusals should surface as [`Error::Provider`] and connectivity problems as
/// [`Error::Transport`](crate::error::Error::Transport); undecodable responses belong in
/// [`Error::Unexpected`](crate::error::Error::Unexpected).
pub trait IdentityProvider
where
	Self: 'static + Send + Sync,
{
	/// Issues one `SignUp` call and resolves with the provider's response.
	fn sign_up<'a>(
		&'a self,
		request: &'a ProviderSignUpRequest,
	) -> ProviderFuture<'a, SignUpResponse>;
}
