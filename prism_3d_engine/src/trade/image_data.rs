/// Image data: owned pixels of an imported image.
///
/// An image is either uncompressed (storage, format and pixel type) or block
/// compressed (compressed storage and format). Accessors of the other
/// representation are programming errors and panic.

use crate::error::{Error, Result};
use super::pixel_storage::{
    pixel_size, CompressedPixelFormat, CompressedPixelStorage, DataProperties, PixelFormat, PixelStorage,
    PixelType,
};

#[derive(Debug, Clone, PartialEq)]
enum Representation {
    Uncompressed {
        storage: PixelStorage,
        format: PixelFormat,
        pixel_type: PixelType,
    },
    Compressed {
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
    },
}

/// Owned image data with `D` dimensions
///
/// `D` is 1, 2 or 3; constructing any other dimension count panics. Prefer the
/// [`ImageData1D`], [`ImageData2D`] and [`ImageData3D`] aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData<const D: usize> {
    representation: Representation,
    size: [u32; D],
    data: Vec<u8>,
}

pub type ImageData1D = ImageData<1>;
pub type ImageData2D = ImageData<2>;
pub type ImageData3D = ImageData<3>;

impl<const D: usize> ImageData<D> {
    /// Uncompressed image with the default pixel storage
    pub fn new(format: PixelFormat, pixel_type: PixelType, size: [u32; D], data: Vec<u8>) -> Result<Self> {
        Self::with_storage(PixelStorage::default(), format, pixel_type, size, data)
    }

    /// Uncompressed image.
    ///
    /// Fails with `InvalidData` when `data` is shorter than the layout
    /// described by `storage` requires.
    pub fn with_storage(
        storage: PixelStorage,
        format: PixelFormat,
        pixel_type: PixelType,
        size: [u32; D],
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = storage.data_properties(pixel_size(format, pixel_type), size).data_size;
        if data.len() < expected {
            return Err(Error::InvalidData(format!(
                "ImageData: bad image data size, got {} but expected at least {}",
                data.len(),
                expected
            )));
        }

        Ok(Self {
            representation: Representation::Uncompressed { storage, format, pixel_type },
            size,
            data,
        })
    }

    /// Compressed image with the default compressed pixel storage
    pub fn new_compressed(format: CompressedPixelFormat, size: [u32; D], data: Vec<u8>) -> Result<Self> {
        Self::compressed_with_storage(CompressedPixelStorage::default(), format, size, data)
    }

    /// Compressed image. `data` must hold every block of the image.
    pub fn compressed_with_storage(
        storage: CompressedPixelStorage,
        format: CompressedPixelFormat,
        size: [u32; D],
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = storage.data_size(format, size);
        if data.len() < expected {
            return Err(Error::InvalidData(format!(
                "ImageData: bad compressed image data size, got {} but expected at least {}",
                data.len(),
                expected
            )));
        }

        Ok(Self {
            representation: Representation::Compressed { storage, format },
            size,
            data,
        })
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.representation, Representation::Compressed { .. })
    }

    /// Size in pixels
    pub fn size(&self) -> [u32; D] {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the image and keep its bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    // ===== UNCOMPRESSED =====

    /// # Panics
    ///
    /// If the image is compressed.
    pub fn storage(&self) -> PixelStorage {
        self.uncompressed("storage").0
    }

    /// # Panics
    ///
    /// If the image is compressed.
    pub fn format(&self) -> PixelFormat {
        self.uncompressed("format").1
    }

    /// # Panics
    ///
    /// If the image is compressed.
    pub fn pixel_type(&self) -> PixelType {
        self.uncompressed("pixel_type").2
    }

    /// Size of one pixel in bytes
    ///
    /// # Panics
    ///
    /// If the image is compressed.
    pub fn pixel_size(&self) -> usize {
        let (_, format, pixel_type) = self.uncompressed("pixel_size");
        pixel_size(format, pixel_type)
    }

    /// Offset, strides and minimal size of the pixel data
    ///
    /// # Panics
    ///
    /// If the image is compressed.
    pub fn data_properties(&self) -> DataProperties<D> {
        let (storage, format, pixel_type) = self.uncompressed("data_properties");
        storage.data_properties(pixel_size(format, pixel_type), self.size)
    }

    /// Pixels reinterpreted as `T`, from the first pixel on.
    ///
    /// `T` must be exactly one pixel large and neither rows nor slices may be
    /// padded.
    ///
    /// # Panics
    ///
    /// If the image is compressed.
    pub fn pixels<T: bytemuck::Pod>(&self) -> Result<&[T]> {
        let properties = self.data_properties();

        if std::mem::size_of::<T>() != properties.pixel_size {
            return Err(Error::InvalidData(format!(
                "ImageData::pixels(): type of {} bytes for pixels of {} bytes",
                std::mem::size_of::<T>(),
                properties.pixel_size
            )));
        }
        if D > 1 && properties.strides[1] != properties.pixel_size * self.size[0] as usize {
            return Err(Error::InvalidOperation(
                "ImageData::pixels(): rows are padded".to_string(),
            ));
        }
        if D > 2 && properties.strides[2] != properties.strides[1] * self.size[1] as usize {
            return Err(Error::InvalidOperation(
                "ImageData::pixels(): slices are padded".to_string(),
            ));
        }

        let pixel_count: usize = self.size.iter().map(|&extent| extent as usize).product();
        let end = properties.offset + pixel_count * properties.pixel_size;
        bytemuck::try_cast_slice(&self.data[properties.offset..end])
            .map_err(|e| Error::InvalidData(format!("ImageData::pixels(): {}", e)))
    }

    /// Borrowed view of an uncompressed image
    ///
    /// # Panics
    ///
    /// If the image is compressed.
    pub fn as_view(&self) -> ImageView<'_, D> {
        let (storage, format, pixel_type) = self.uncompressed("as_view");
        ImageView { storage, format, pixel_type, size: self.size, data: &self.data }
    }

    fn uncompressed(&self, method: &str) -> (PixelStorage, PixelFormat, PixelType) {
        match self.representation {
            Representation::Uncompressed { storage, format, pixel_type } => (storage, format, pixel_type),
            Representation::Compressed { .. } => panic!("ImageData::{}(): the image is compressed", method),
        }
    }

    // ===== COMPRESSED =====

    /// # Panics
    ///
    /// If the image is not compressed.
    pub fn compressed_storage(&self) -> CompressedPixelStorage {
        self.compressed("compressed_storage").0
    }

    /// # Panics
    ///
    /// If the image is not compressed.
    pub fn compressed_format(&self) -> CompressedPixelFormat {
        self.compressed("compressed_format").1
    }

    /// Borrowed view of a compressed image
    ///
    /// # Panics
    ///
    /// If the image is not compressed.
    pub fn as_compressed_view(&self) -> CompressedImageView<'_, D> {
        let (storage, format) = self.compressed("as_compressed_view");
        CompressedImageView { storage, format, size: self.size, data: &self.data }
    }

    fn compressed(&self, method: &str) -> (CompressedPixelStorage, CompressedPixelFormat) {
        match self.representation {
            Representation::Compressed { storage, format } => (storage, format),
            Representation::Uncompressed { .. } => panic!("ImageData::{}(): the image is not compressed", method),
        }
    }
}

/// Borrowed uncompressed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageView<'a, const D: usize> {
    pub storage: PixelStorage,
    pub format: PixelFormat,
    pub pixel_type: PixelType,
    pub size: [u32; D],
    pub data: &'a [u8],
}

impl<'a, const D: usize> ImageView<'a, D> {
    pub fn pixel_size(&self) -> usize {
        pixel_size(self.format, self.pixel_type)
    }

    pub fn data_properties(&self) -> DataProperties<D> {
        self.storage.data_properties(self.pixel_size(), self.size)
    }
}

/// Borrowed compressed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressedImageView<'a, const D: usize> {
    pub storage: CompressedPixelStorage,
    pub format: CompressedPixelFormat,
    pub size: [u32; D],
    pub data: &'a [u8],
}

#[cfg(test)]
#[path = "image_data_tests.rs"]
mod tests;
