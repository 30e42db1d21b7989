/// Window and context configuration.
///
/// Plain structs with public fields, defaults and chaining `with_*` helpers.

use bitflags::bitflags;
use glam::IVec2;

bitflags! {
    /// Native window creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowConfigurationFlags: u32 {
        const RESIZABLE = 1 << 0;
        const FULLSCREEN = 1 << 1;
        /// Do not show the window after creation
        const HIDDEN = 1 << 2;
        const MAXIMIZED = 1 << 3;
        const MINIMIZED = 1 << 4;
        /// Grab the mouse in this window once it is created
        const MOUSE_LOCKED = 1 << 5;
    }
}

bitflags! {
    /// GL context creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u32 {
        const DEBUG = 0x0001;
        const FORWARD_COMPATIBLE = 0x0002;
        const ROBUST_ACCESS = 0x0004;
        const RESET_ISOLATION = 0x0008;
    }
}

/// Requested GL version. `None` lets the application pick the best
/// available one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Version {
    #[default]
    None,
    GL210,
    GL300,
    GL310,
    GL320,
    GL330,
    GL400,
    GL410,
    GL420,
    GL430,
    GL440,
    GL450,
}

impl Version {
    /// `(major, minor)`, or `None` for [`Version::None`]
    pub fn major_minor(self) -> Option<(u8, u8)> {
        Some(match self {
            Version::None => return None,
            Version::GL210 => (2, 1),
            Version::GL300 => (3, 0),
            Version::GL310 => (3, 1),
            Version::GL320 => (3, 2),
            Version::GL330 => (3, 3),
            Version::GL400 => (4, 0),
            Version::GL410 => (4, 1),
            Version::GL420 => (4, 2),
            Version::GL430 => (4, 3),
            Version::GL440 => (4, 4),
            Version::GL450 => (4, 5),
        })
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfiguration {
    pub title: String,
    pub size: IVec2,
    pub window_flags: WindowConfigurationFlags,
}

impl Default for WindowConfiguration {
    fn default() -> Self {
        Self {
            title: "Prism3D Application".to_string(),
            size: IVec2::new(800, 600),
            window_flags: WindowConfigurationFlags::empty(),
        }
    }
}

impl WindowConfiguration {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, size: IVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_window_flags(mut self, flags: WindowConfigurationFlags) -> Self {
        self.window_flags = flags;
        self
    }
}

/// Window plus rendering context configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub window: WindowConfiguration,
    /// Multisampling samples, `0` or `1` for none
    pub sample_count: u32,
    pub version: Version,
    pub flags: ContextFlags,
    pub srgb_capable: bool,
    /// Names of driver workarounds that must not be applied
    pub disabled_workarounds: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            window: WindowConfiguration::default(),
            sample_count: 0,
            version: Version::None,
            flags: ContextFlags::empty(),
            srgb_capable: false,
            disabled_workarounds: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn with_window(mut self, window: WindowConfiguration) -> Self {
        self.window = window;
        self
    }

    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_flags(mut self, flags: ContextFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_srgb_capable(mut self, srgb_capable: bool) -> Self {
        self.srgb_capable = srgb_capable;
        self
    }

    pub fn with_disabled_workaround(mut self, workaround: impl Into<String>) -> Self {
        self.disabled_workarounds.push(workaround.into());
        self
    }

    pub fn is_workaround_disabled(&self, workaround: &str) -> bool {
        self.disabled_workarounds.iter().any(|w| w == workaround)
    }
}
