use crate::domain::types::TypeConstraintError;

#[cfg(feature = "cli")]
pub mod config;
pub mod content;
pub mod machine;

/// Decode an optional stored column into a value object. Blank strings were
/// written by older clients for "no value" and decode to `None`.
pub(crate) fn stored_optional<T>(value: Option<String>) -> Result<Option<T>, TypeConstraintError>
where
    T: TryFrom<String, Error = TypeConstraintError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(T::try_from)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ImageUrl;

    #[test]
    fn blank_stored_values_decode_to_none() {
        assert_eq!(stored_optional::<ImageUrl>(None), Ok(None));
        assert_eq!(stored_optional::<ImageUrl>(Some("  ".into())), Ok(None));
        assert!(stored_optional::<ImageUrl>(Some("not a url".into())).is_err());
        assert_eq!(
            stored_optional::<ImageUrl>(Some("https://example.com/a.png".into()))
                .unwrap()
                .map(ImageUrl::into_inner),
            Some("https://example.com/a.png".to_string())
        );
    }
}
