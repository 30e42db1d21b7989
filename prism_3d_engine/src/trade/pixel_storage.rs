/// Pixel formats, pixel types and the memory layout of image data

use glam::{IVec3, UVec3};

// ===== UNCOMPRESSED =====

/// Components stored for each pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Red,
    RG,
    RGB,
    RGBA,
    BGR,
    BGRA,
    DepthComponent,
    StencilIndex,
    DepthStencil,
}

impl PixelFormat {
    /// Number of components, for non-packed pixel types
    pub fn component_count(self) -> usize {
        match self {
            PixelFormat::Red | PixelFormat::DepthComponent | PixelFormat::StencilIndex => 1,
            PixelFormat::RG | PixelFormat::DepthStencil => 2,
            PixelFormat::RGB | PixelFormat::BGR => 3,
            PixelFormat::RGBA | PixelFormat::BGRA => 4,
        }
    }
}

/// Data type of each pixel component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    UnsignedByte,
    Byte,
    UnsignedShort,
    Short,
    UnsignedInt,
    Int,
    HalfFloat,
    Float,
    // Packed types: all components in one value
    UnsignedShort565,
    UnsignedShort4444,
    UnsignedShort5551,
    UnsignedInt2101010Rev,
    UnsignedInt248,
}

impl PixelType {
    /// Size of one value of this type in bytes
    pub fn size(self) -> usize {
        match self {
            PixelType::UnsignedByte | PixelType::Byte => 1,
            PixelType::UnsignedShort
            | PixelType::Short
            | PixelType::HalfFloat
            | PixelType::UnsignedShort565
            | PixelType::UnsignedShort4444
            | PixelType::UnsignedShort5551 => 2,
            PixelType::UnsignedInt
            | PixelType::Int
            | PixelType::Float
            | PixelType::UnsignedInt2101010Rev
            | PixelType::UnsignedInt248 => 4,
        }
    }

    /// Whether one value holds every component of a pixel
    pub fn is_packed(self) -> bool {
        matches!(
            self,
            PixelType::UnsignedShort565
                | PixelType::UnsignedShort4444
                | PixelType::UnsignedShort5551
                | PixelType::UnsignedInt2101010Rev
                | PixelType::UnsignedInt248
        )
    }
}

/// Size of one pixel in bytes
pub fn pixel_size(format: PixelFormat, pixel_type: PixelType) -> usize {
    if pixel_type.is_packed() {
        pixel_type.size()
    } else {
        format.component_count() * pixel_type.size()
    }
}

/// Layout of uncompressed pixel rows in memory
///
/// Zero `row_length` / `image_height` mean "same as the image size".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelStorage {
    /// Row alignment in bytes: 1, 2, 4 or 8
    pub alignment: usize,
    /// Pixels per row, if longer than the image width
    pub row_length: u32,
    /// Rows per image slice, if more than the image height
    pub image_height: u32,
    /// Pixels, rows and slices to skip before the image
    pub skip: IVec3,
}

impl Default for PixelStorage {
    fn default() -> Self {
        Self {
            alignment: 4,
            row_length: 0,
            image_height: 0,
            skip: IVec3::ZERO,
        }
    }
}

impl PixelStorage {
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_row_length(mut self, row_length: u32) -> Self {
        self.row_length = row_length;
        self
    }

    pub fn with_image_height(mut self, image_height: u32) -> Self {
        self.image_height = image_height;
        self
    }

    pub fn with_skip(mut self, skip: IVec3) -> Self {
        self.skip = skip;
        self
    }

    /// Byte layout of an image of `size` pixels with `pixel_size` bytes each
    ///
    /// # Panics
    ///
    /// If `D` is not 1, 2 or 3, the alignment is not 1, 2, 4 or 8, or `skip`
    /// is negative.
    pub fn data_properties<const D: usize>(&self, pixel_size: usize, size: [u32; D]) -> DataProperties<D> {
        assert!(
            (1..=3).contains(&D),
            "PixelStorage::data_properties(): unsupported dimension count {}",
            D
        );
        assert!(
            matches!(self.alignment, 1 | 2 | 4 | 8),
            "PixelStorage::data_properties(): invalid alignment {}",
            self.alignment
        );
        assert!(
            self.skip.min_element() >= 0,
            "PixelStorage::data_properties(): negative skip {:?}",
            self.skip
        );

        let extent = extent3(size);
        let row_pixels = (if self.row_length > 0 { self.row_length } else { extent.x }) as usize;
        let row_stride = align_up(row_pixels * pixel_size, self.alignment);
        let slice_rows = (if self.image_height > 0 { self.image_height } else { extent.y }) as usize;
        let slice_stride = row_stride * slice_rows;

        let all_strides = [pixel_size, row_stride, slice_stride];
        let mut strides = [0; D];
        strides.copy_from_slice(&all_strides[..D]);

        let skip = self.skip.as_uvec3();
        let offset = (0..D).map(|i| skip[i] as usize * all_strides[i]).sum();

        let data_size = if size.contains(&0) {
            0
        } else {
            // The outermost dimension spans whole rows (1D) or whole slices
            let outer = [row_stride, row_stride * extent.y as usize, slice_stride * extent.z as usize];
            offset + outer[D - 1]
        };

        DataProperties { offset, strides, pixel_size, data_size }
    }
}

/// Byte layout of uncompressed image data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataProperties<const D: usize> {
    /// Offset of the first pixel
    pub offset: usize,
    /// Distance between consecutive pixels, rows and slices
    pub strides: [usize; D],
    pub pixel_size: usize,
    /// Minimal data length for the image
    pub data_size: usize,
}

// ===== COMPRESSED =====

/// Block-compressed pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressedPixelFormat {
    Bc1RgbUnorm,
    Bc1RgbaUnorm,
    Bc2RgbaUnorm,
    Bc3RgbaUnorm,
    Bc4RUnorm,
    Bc5RgUnorm,
    Bc7RgbaUnorm,
    Etc2Rgb8Unorm,
    Astc4x4RgbaUnorm,
    Astc8x8RgbaUnorm,
}

impl CompressedPixelFormat {
    /// Block size in pixels
    pub fn block_size(self) -> UVec3 {
        match self {
            CompressedPixelFormat::Astc8x8RgbaUnorm => UVec3::new(8, 8, 1),
            _ => UVec3::new(4, 4, 1),
        }
    }

    /// Size of one block in bytes
    pub fn block_data_size(self) -> usize {
        match self {
            CompressedPixelFormat::Bc1RgbUnorm
            | CompressedPixelFormat::Bc1RgbaUnorm
            | CompressedPixelFormat::Bc4RUnorm
            | CompressedPixelFormat::Etc2Rgb8Unorm => 8,
            CompressedPixelFormat::Bc2RgbaUnorm
            | CompressedPixelFormat::Bc3RgbaUnorm
            | CompressedPixelFormat::Bc5RgUnorm
            | CompressedPixelFormat::Bc7RgbaUnorm
            | CompressedPixelFormat::Astc4x4RgbaUnorm
            | CompressedPixelFormat::Astc8x8RgbaUnorm => 16,
        }
    }
}

/// Layout of compressed image data, in whole blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompressedPixelStorage {
    /// Pixels per row, if longer than the image width
    pub row_length: u32,
    /// Rows per image slice, if more than the image height
    pub image_height: u32,
    /// Pixels, rows and slices to skip, multiples of the block size
    pub skip: IVec3,
}

impl CompressedPixelStorage {
    /// Minimal data length for an image of `size` pixels
    pub fn data_size<const D: usize>(&self, format: CompressedPixelFormat, size: [u32; D]) -> usize {
        assert!(
            (1..=3).contains(&D),
            "CompressedPixelStorage::data_size(): unsupported dimension count {}",
            D
        );
        if size.contains(&0) {
            return 0;
        }

        let extent = extent3(size);
        let block = format.block_size();
        let row_pixels = if self.row_length > 0 { self.row_length } else { extent.x };
        let slice_rows = if self.image_height > 0 { self.image_height } else { extent.y };

        let row_blocks = row_pixels.div_ceil(block.x) as usize;
        let slice_blocks = row_blocks * slice_rows.div_ceil(block.y) as usize;
        let skip = self.skip.max(IVec3::ZERO).as_uvec3() / block;

        let block_offset = skip.x as usize + skip.y as usize * row_blocks + skip.z as usize * slice_blocks;
        // Image height only separates slices of 3D images
        let rows = if D == 3 { slice_rows } else { extent.y };
        let blocks = row_blocks * rows.div_ceil(block.y) as usize * extent.z.div_ceil(block.z) as usize;

        (block_offset + blocks) * format.block_data_size()
    }
}

// ===== HELPERS =====

/// Size padded to three dimensions with ones
fn extent3<const D: usize>(size: [u32; D]) -> UVec3 {
    let mut extent = UVec3::ONE;
    for (i, value) in size.iter().enumerate().take(3) {
        extent[i] = *value;
    }
    extent
}

fn align_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

#[cfg(test)]
#[path = "pixel_storage_tests.rs"]
mod tests;
