//! Resolution of user and group names to the numeric IDs an [Ownership] is made of, via the host's
//! user and group databases. Like "chown", a name is looked up first, and a decimal number is only
//! treated as a raw ID when no account with that name exists.

use nix::unistd::{Group, User};

use crate::ownership::Ownership;

/// An error that can occur when resolving a user, a group or an "OWNER:GROUP" specification.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("The user \"{0}\" does not exist in the user database and is not a numeric UID")]
    UnknownUser(String),
    #[error("The group \"{0}\" does not exist in the group database and is not a numeric GID")]
    UnknownGroup(String),
    #[error("The ownership specification \"{0}\" has an empty owner")]
    EmptyOwner(String),
    #[error("The ownership specification \"{0}\" has no group; use \"OWNER:GROUP\" or \"OWNER:\"")]
    MissingGroup(String),
    #[error("Looking up an account in the host database failed: {0}")]
    LookupFailed(std::io::Error),
}

fn lookup_error(errno: nix::Error) -> IdentityError {
    IdentityError::LookupFailed(std::io::Error::from_raw_os_error(errno as i32))
}

fn lookup_user(name: &str) -> Result<User, IdentityError> {
    match User::from_name(name).map_err(lookup_error)? {
        Some(user) => Ok(user),
        None => Err(IdentityError::UnknownUser(name.to_owned())),
    }
}

/// Resolve a user name, or failing that a numeric UID, to a UID.
pub fn resolve_user(name: &str) -> Result<u32, IdentityError> {
    match lookup_user(name) {
        Ok(user) => Ok(user.uid.as_raw()),
        Err(IdentityError::UnknownUser(_)) => name
            .parse::<u32>()
            .map_err(|_| IdentityError::UnknownUser(name.to_owned())),
        Err(err) => Err(err),
    }
}

/// Resolve a group name, or failing that a numeric GID, to a GID.
pub fn resolve_group(name: &str) -> Result<u32, IdentityError> {
    match Group::from_name(name).map_err(lookup_error)? {
        Some(group) => Ok(group.gid.as_raw()),
        None => name
            .parse::<u32>()
            .map_err(|_| IdentityError::UnknownGroup(name.to_owned())),
    }
}

/// Parse an "OWNER:GROUP" specification into an [Ownership]. "OWNER:" uses the login group of the
/// owner, which then must be a user present in the user database.
pub fn parse_owner_spec(spec: &str) -> Result<Ownership, IdentityError> {
    let Some((owner, group)) = spec.split_once(':') else {
        return Err(IdentityError::MissingGroup(spec.to_owned()));
    };

    if owner.is_empty() {
        return Err(IdentityError::EmptyOwner(spec.to_owned()));
    }

    if group.is_empty() {
        let user = lookup_user(owner)?;
        return Ok(Ownership::new(user.uid.as_raw(), user.gid.as_raw()));
    }

    Ok(Ownership::new(resolve_user(owner)?, resolve_group(group)?))
}
