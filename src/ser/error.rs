use {crate::UnknownSchema, std::borrow::Cow};

/// Any error that may happen during encoding
///
/// When encoding fails, no partial output is ever returned.
pub struct EncodeError {
	inner: Box<ErrorInner>,
}

enum ErrorInner {
	UnknownSchema(UnknownSchema),
	Other(Cow<'static, str>),
}

impl EncodeError {
	/// If you need a dynamic string use `EncodeError::msg(format_args!(...))`
	pub(crate) fn new(s: &'static str) -> Self {
		Self {
			inner: Box::new(ErrorInner::Other(Cow::Borrowed(s))),
		}
	}

	pub(crate) fn msg(s: std::fmt::Arguments<'_>) -> Self {
		Self {
			inner: Box::new(ErrorInner::Other(match s.as_str() {
				Some(s) => Cow::Borrowed(s),
				None => Cow::Owned(s.to_string()),
			})),
		}
	}

	/// Whether encoding failed because the requested schema is unknown, as
	/// opposed to the value not matching the schema
	pub fn is_unknown_schema(&self) -> bool {
		matches!(*self.inner, ErrorInner::UnknownSchema(_))
	}
}

impl From<UnknownSchema> for EncodeError {
	fn from(unknown_schema: UnknownSchema) -> Self {
		Self {
			inner: Box::new(ErrorInner::UnknownSchema(unknown_schema)),
		}
	}
}

impl std::fmt::Debug for EncodeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match *self.inner {
			ErrorInner::UnknownSchema(ref e) => std::fmt::Debug::fmt(e, f),
			ErrorInner::Other(ref s) => std::fmt::Debug::fmt(&**s, f),
		}
	}
}

impl std::fmt::Display for EncodeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match *self.inner {
			ErrorInner::UnknownSchema(ref e) => std::fmt::Display::fmt(e, f),
			ErrorInner::Other(ref s) => std::fmt::Display::fmt(&**s, f),
		}
	}
}

impl std::error::Error for EncodeError {}
