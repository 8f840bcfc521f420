//! Page rasterization backends

use crate::Result;

/// One rendered page, PNG-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 0-based page index
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Converts document pages to bitmaps.
pub trait PageRasterizer: Send + Sync {
    /// Render the first `max_pages` pages of `bytes`, scaling page points by `zoom`.
    fn rasterize(&self, bytes: &[u8], zoom: f32, max_pages: usize) -> Result<Vec<PageImage>>;
}

/// The rasterizer compiled into this build, if any.
pub fn default_rasterizer() -> Option<Box<dyn PageRasterizer>> {
    #[cfg(feature = "pdfium")]
    {
        Some(Box::new(pdfium::PdfiumRasterizer::new()))
    }
    #[cfg(not(feature = "pdfium"))]
    {
        None
    }
}

#[cfg(feature = "pdfium")]
pub mod pdfium {
    //! Rasterizer backed by the PDFium shared library.
    //!
    //! `Pdfium` is not `Send + Sync`, so the library is bound on each call
    //! instead of being stored.

    use std::io::Cursor;
    use std::path::PathBuf;

    use log::debug;
    use pdfium_render::prelude::*;

    use super::{PageImage, PageRasterizer};
    use crate::{Error, Result};

    #[derive(Debug, Clone, Default)]
    pub struct PdfiumRasterizer {
        /// Directory holding the PDFium library; falls back to the system library
        library_dir: Option<PathBuf>,
    }

    impl PdfiumRasterizer {
        pub fn new() -> Self {
            Self {
                library_dir: std::env::var_os("PDFIUM_LIB_DIR").map(PathBuf::from),
            }
        }

        pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
            Self {
                library_dir: Some(dir.into()),
            }
        }

        fn bind(&self) -> Result<Pdfium> {
            if let Some(dir) = &self.library_dir {
                match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)) {
                    Ok(bindings) => return Ok(Pdfium::new(bindings)),
                    Err(e) => debug!("binding PDFium from {} failed: {:?}", dir.display(), e),
                }
            }
            Pdfium::bind_to_system_library()
                .map(Pdfium::new)
                .map_err(|e| Error::Render(format!("Could not load PDFium: {:?}", e)))
        }
    }

    impl PageRasterizer for PdfiumRasterizer {
        fn rasterize(&self, bytes: &[u8], zoom: f32, max_pages: usize) -> Result<Vec<PageImage>> {
            let pdfium = self.bind()?;
            let doc = pdfium
                .load_pdf_from_byte_slice(bytes, None)
                .map_err(|e| Error::Decode(format!("{:?}", e)))?;

            let mut out = Vec::new();
            for (index, page) in doc.pages().iter().enumerate().take(max_pages) {
                let width = (page.width().value * zoom) as i32;
                let height = (page.height().value * zoom) as i32;
                let config = PdfRenderConfig::new()
                    .set_target_width(width)
                    .set_target_height(height)
                    .render_form_data(true)
                    .render_annotations(true);

                let bitmap = page
                    .render_with_config(&config)
                    .map_err(|e| Error::Render(format!("page {}: {:?}", index + 1, e)))?;

                let rendered = bitmap.as_image();
                let mut png = Vec::new();
                rendered
                    .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
                    .map_err(|e| Error::Render(format!("PNG encoding failed: {}", e)))?;

                out.push(PageImage {
                    index,
                    width: rendered.width(),
                    height: rendered.height(),
                    png,
                });
            }
            Ok(out)
        }
    }
}
