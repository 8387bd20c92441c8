//! Legacy providers: free-form bundles of formats without an identifier.
//!
//! Providers implement the same [`Formats`] contract as extensions but are
//! found by scanning a generator's ordered provider list for the first one
//! that lists the requested name.

use std::rc::Rc;

use crate::extension::Formats;

mod base;
mod en_sg;
mod person;

pub use base::BaseProvider;
pub use en_sg::{SingaporeIdentityProvider, singapore_checksum};
pub use person::PersonProvider;

/// Returns the providers a default generator scans, in priority order.
#[must_use]
pub fn default_providers() -> Vec<Rc<dyn Formats>> {
    vec![
        Rc::new(BaseProvider),
        Rc::new(PersonProvider),
        Rc::new(SingaporeIdentityProvider),
    ]
}
