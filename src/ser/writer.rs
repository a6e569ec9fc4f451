use integer_encoding::VarInt;

/// Append-only buffer of Avro binary-encoded primitives
///
/// Backed by a `Vec<u8>`, so growth is geometric and `result` is exactly the
/// bytes written so far. None of the write operations can fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryWriter {
	buf: Vec<u8>,
}

impl BinaryWriter {
	pub fn new() -> Self {
		Self::with_capacity(1024)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			buf: Vec::with_capacity(capacity),
		}
	}

	/// `1` for `true`, `0` for `false`
	pub fn write_bool(&mut self, v: bool) {
		self.buf.push(v as u8);
	}

	/// Zig-zag then base-128 varint, least significant group first
	///
	/// This is also how union branches, enum indexes and block counts are
	/// written.
	pub fn write_int(&mut self, v: i32) {
		let mut varint_buf = [0u8; 5];
		let n = v.encode_var(&mut varint_buf);
		self.buf.extend_from_slice(&varint_buf[..n]);
	}

	/// 4 bytes, IEEE-754, little-endian
	pub fn write_float(&mut self, v: f32) {
		self.buf.extend_from_slice(&v.to_le_bytes());
	}

	/// 8 bytes, IEEE-754, little-endian
	pub fn write_double(&mut self, v: f64) {
		self.buf.extend_from_slice(&v.to_le_bytes());
	}

	/// The raw UTF-8 bytes of `s`, with no length prefix
	pub fn write_string(&mut self, s: &str) {
		self.write_bytes(s.as_bytes());
	}

	/// The raw bytes, with no length prefix
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	/// Length as a zig-zag varint, then the raw bytes
	///
	/// This is the standard Avro framing of `string` and `bytes`.
	pub fn write_length_delimited(&mut self, bytes: &[u8]) {
		let mut varint_buf = [0u8; 10];
		// Slices are never longer than isize::MAX
		let n = (bytes.len() as i64).encode_var(&mut varint_buf);
		self.buf.extend_from_slice(&varint_buf[..n]);
		self.buf.extend_from_slice(bytes);
	}

	/// Exactly the bytes written so far
	pub fn result(&self) -> &[u8] {
		&self.buf
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Drop everything written so far, keeping the allocation
	pub fn clear(&mut self) {
		self.buf.clear();
	}

	pub(crate) fn truncate(&mut self, len: usize) {
		self.buf.truncate(len);
	}
}
