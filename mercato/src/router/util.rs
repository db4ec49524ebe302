use mercato_core::{Capability, MercatoError};

/// Collapse a set of provider errors into a uniform `MercatoError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - Skips (`RateLimited`, `Unsupported`) are ignored when classifying.
/// - If every remaining error is `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and every remaining error is `NotFound`
///   (or nothing but skips happened) → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<MercatoError>,
    not_found_what: Option<String>,
) -> MercatoError {
    if !attempted_any {
        return MercatoError::unsupported(capability.to_string());
    }
    let real: Vec<&MercatoError> = errors.iter().filter(|e| !e.is_skip()).collect();
    if !real.is_empty()
        && real
            .iter()
            .all(|e| matches!(e, MercatoError::ProviderTimeout { .. }))
    {
        return MercatoError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && real
            .iter()
            .all(|e| matches!(e, MercatoError::NotFound { .. }))
    {
        return MercatoError::not_found(what);
    }
    MercatoError::AllProvidersFailed(errors)
}
