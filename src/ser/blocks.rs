use super::*;

impl DatumEncoder<'_, '_> {
	/// Write `items` as a single block followed by the zero-sized block that
	/// ends the array or map
	///
	/// An empty collection is written as a zero count then the end marker,
	/// except with [`StringEncoding::LengthPrefixed`] where it is only the end
	/// marker, as other Avro implementations write it.
	pub(super) fn encode_block<I, F>(
		&mut self,
		len: usize,
		items: I,
		mut encode_item: F,
	) -> Result<(), EncodeError>
	where
		I: IntoIterator,
		F: FnMut(&mut Self, I::Item) -> Result<(), EncodeError>,
	{
		if len > 0
			|| self.registry.config().string_encoding() == StringEncoding::Unprefixed
		{
			let len: i32 = len
				.try_into()
				.map_err(|_| EncodeError::new("Array or map len overflows i32"))?;
			self.writer.write_int(len);
			for item in items {
				encode_item(self, item)?;
			}
		}
		self.writer.write_int(0);
		Ok(())
	}
}
