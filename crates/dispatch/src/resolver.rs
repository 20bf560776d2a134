// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contact resolution: turns a commitment into concrete delivery targets.

use tracing::warn;
use whatsping_domain::{Commitment, Recipient};
use whatsping_gateway::normalize_address;
use whatsping_persistence::{ContactRecord, Persistence, PersistenceError, ProfileRecord};

/// Outcome of resolving a commitment's recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The owner has no usable delivery address; nothing can be sent.
    NoOwnerAddress {
        /// Owner display name, for the skip entry in the sweep result.
        owner_name: String,
    },
    /// The resolved targets: the owner first, then delegated contacts in
    /// their stored order.
    Recipients(Vec<Recipient>),
}

/// Resolves the delivery targets for one commitment.
///
/// The owner's profile number is mandatory: without it the whole
/// commitment is skipped, delegated contacts included. Delegated
/// contacts that have been deleted, or whose stored number contains no
/// digits, are dropped with a warning rather than failing the sweep.
///
/// # Errors
///
/// Returns an error only for store failures; missing recipient data is
/// reported through `Resolution`, never as an error.
pub fn resolve_recipients(
    store: &mut Persistence,
    commitment: &Commitment,
) -> Result<Resolution, PersistenceError> {
    let profile: ProfileRecord = store.get_profile(commitment.profile_id)?;

    let owner_address: String = profile
        .whatsapp_number
        .as_deref()
        .map(normalize_address)
        .unwrap_or_default();

    if owner_address.is_empty() {
        return Ok(Resolution::NoOwnerAddress {
            owner_name: profile.name,
        });
    }

    let mut recipients: Vec<Recipient> = vec![Recipient {
        address: owner_address,
        display_name: profile.name,
    }];

    let contacts: Vec<ContactRecord> = store.get_contacts_by_ids(&commitment.notify_contact_ids)?;
    for contact in contacts {
        let address: String = normalize_address(&contact.whatsapp_number);
        if address.is_empty() {
            warn!(
                "Contact {} has no usable number, dropping from fan-out",
                contact.contact_id
            );
            continue;
        }
        recipients.push(Recipient {
            address,
            display_name: contact.name,
        });
    }

    Ok(Resolution::Recipients(recipients))
}
