/// Collage parameter resolution
///
/// Pure translation from form state (canvas type, size preset or custom
/// dimensions, resolution, layout, spacing, format) to the literal request
/// parameters the rendering service expects. Nothing in this module touches
/// the network or the UI, so every rule here is unit-testable.

use std::fmt;

/// Sentinel preset label that switches the form to custom width/height inputs
pub const CUSTOM_DIMENSIONS: &str = "Custom Dimensions";

/// Print canvas presets. Labels carry centimeter values and an explicit
/// orientation; the wire format wants millimeters.
pub const PRINT_SIZE_PRESETS: &[&str] = &[
    "9x13cm (Portrait)",
    "13x9cm (Landscape)",
    "10x15cm (Portrait)",
    "15x10cm (Landscape)",
    "13x18cm (Portrait)",
    "18x13cm (Landscape)",
    "15x20cm (Portrait)",
    "20x15cm (Landscape)",
    "20x25cm (Portrait)",
    "25x20cm (Landscape)",
    "21x29.7cm A4 (Portrait)",
    "29.7x21cm A4 (Landscape)",
    "30x40cm (Portrait)",
    "40x30cm (Landscape)",
    "29.7x42.0cm A3 (Portrait)",
    "42.0x29.7cm A3 (Landscape)",
    "40x50cm (Portrait)",
    "50x40cm (Landscape)",
    "50x70cm (Portrait)",
    "70x50cm (Landscape)",
    "100x70cm (Portrait)",
    "70x100cm (Landscape)",
    CUSTOM_DIMENSIONS,
];

/// Digital canvas presets (pixel dimensions)
pub const DIGITAL_SIZE_PRESETS: &[&str] = &[
    // Phone screens
    "1080x1920 (Portrait)",
    "1920x1080 (Landscape)",
    "1170x2532 iPhone (Portrait)",
    "2532x1170 iPhone (Landscape)",
    // Desktop wallpapers
    "2560x1440 (Landscape)",
    "3840x2160 4K (Landscape)",
    "1440x2560 (Portrait)",
    "2160x3840 4K (Portrait)",
    // Social media
    "Instagram 1080x1080 (Square)",
    "Instagram 1080x1350 (Portrait)",
    "Instagram 1080x566 (Landscape)",
    "Instagram Story/Reel 1080x1920",
    "Facebook Post 1200x630",
    "Facebook Cover 820x312",
    "Twitter/X Header 1500x500",
    "LinkedIn Post 1200x627",
    "YouTube Thumbnail 1280x720",
    "Pinterest Pin 1000x1500",
    CUSTOM_DIMENSIONS,
];

/// Resolution choices shown for Print canvases
pub const RESOLUTION_OPTIONS: &[&str] = &[
    "300 DPI (High)",
    "150 DPI (Standard)",
    "96 DPI (Screen)",
];

/// Output format choices
pub const FORMAT_OPTIONS: &[&str] = &[
    "JPEG (Smallest File Size)",
    "PNG (Transparency)",
    "TIFF (Print Quality)",
];

pub const DEFAULT_RESOLUTION: &str = "150 DPI (Standard)";
pub const DEFAULT_FORMAT: &str = "JPEG (Smallest File Size)";

/// DPI used for pixel canvases. The renderer works in pixels there, but the
/// API still expects a dpi field, and the grid advisor converts px to mm
/// with it.
pub const DIGITAL_DPI: u32 = 96;

/// Whether output targets physical print (mm + DPI) or a pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasType {
    Print,
    Digital,
}

impl CanvasType {
    pub const ALL: [CanvasType; 2] = [CanvasType::Print, CanvasType::Digital];
}

impl fmt::Display for CanvasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasType::Print => write!(f, "Print"),
            CanvasType::Digital => write!(f, "Digital"),
        }
    }
}

/// Compositing strategy used by the rendering service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutType {
    Masonry,
    Grid,
}

impl LayoutType {
    /// Wire value for the `layout_style` field
    pub fn wire_name(self) -> &'static str {
        match self {
            LayoutType::Masonry => "masonry",
            LayoutType::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutType::Masonry => write!(f, "Masonry"),
            LayoutType::Grid => write!(f, "Grid"),
        }
    }
}

/// Encoding the service should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Tiff,
}

impl OutputFormat {
    /// Wire value for the `output_format` field
    pub fn wire_name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// File extension used when saving a finished render
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }
}

/// Parse the output format from a UI label ("PNG (Transparency)" etc.)
pub fn parse_output_format(label: &str) -> OutputFormat {
    if label.starts_with("PNG") {
        OutputFormat::Png
    } else if label.starts_with("TIFF") {
        OutputFormat::Tiff
    } else {
        OutputFormat::Jpeg
    }
}

/// Extract the leading integer from a resolution label like "150 DPI (Standard)".
/// Defaults to 150 when no `<digits> DPI` pattern is present.
pub fn parse_dpi(label: &str) -> u32 {
    let lower = label.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let mut j = i;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            if bytes[j..].starts_with(b"dpi") {
                if let Ok(dpi) = lower[start..i].parse() {
                    return dpi;
                }
            }
        } else {
            i += 1;
        }
    }
    150
}

/// Parse `<number>x<number>` out of a preset label.
///
/// Returns values in mm for Print (labels are cm, so x10) and px for
/// Digital. If the label states an orientation that disagrees with the
/// numeric order, the pair is swapped so the stated orientation wins.
pub fn parse_preset_dimensions(preset: &str, canvas: CanvasType) -> Option<(f64, f64)> {
    let (mut width, mut height) = extract_dimension_pair(preset)?;

    if canvas == CanvasType::Print {
        // cm in the label, mm on the wire
        width *= 10.0;
        height *= 10.0;
    }

    if preset.contains("(Landscape)") && width < height {
        std::mem::swap(&mut width, &mut height);
    }
    if preset.contains("(Portrait)") && width > height {
        std::mem::swap(&mut width, &mut height);
    }

    Some((width, height))
}

/// Find the first `<decimal>x<decimal>` pair in a label
fn extract_dimension_pair(label: &str) -> Option<(f64, f64)> {
    let bytes = label.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'x' {
            continue;
        }
        // Expand left and right over digits and decimal points
        let mut start = i;
        while start > 0 && (bytes[start - 1].is_ascii_digit() || bytes[start - 1] == b'.') {
            start -= 1;
        }
        let mut end = i + 1;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if start == i || end == i + 1 {
            continue;
        }
        let left: f64 = label[start..i].parse().ok()?;
        let right: f64 = label[i + 1..end].parse().ok()?;
        return Some((left, right));
    }
    None
}

/// Parse a custom width/height input. Empty, non-numeric, non-finite or
/// non-positive input yields `None`, which suppresses any request.
pub fn parse_custom_dimension(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Convert the UI spacing fraction (0.0..=0.3) to a wire percentage,
/// rounded to two decimals and clamped to 0..=100.
pub fn spacing_percent(fraction: f64) -> f64 {
    ((fraction * 10000.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Canvas fill for the collage background. Transparent only when the output
/// is PNG with transparency enabled; opaque white otherwise.
pub fn background_color(format: OutputFormat, transparency: bool) -> &'static str {
    if format == OutputFormat::Png && transparency {
        "#00000000"
    } else {
        "#FFFFFF"
    }
}

/// Resolved canvas dimensions, either physical or pixel-based
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasDimensions {
    Millimeters { width: f64, height: f64, dpi: u32 },
    Pixels { width: u32, height: u32 },
}

impl CanvasDimensions {
    /// The dpi value sent on the wire (96 forced for pixel canvases)
    pub fn dpi(&self) -> u32 {
        match self {
            CanvasDimensions::Millimeters { dpi, .. } => *dpi,
            CanvasDimensions::Pixels { .. } => DIGITAL_DPI,
        }
    }

    /// Geometry in millimeters. Pixel canvases convert at 96 DPI
    /// (`mm = px * 25.4 / dpi`), which is what the grid advisor sends.
    pub fn size_mm(&self) -> (f64, f64) {
        match self {
            CanvasDimensions::Millimeters { width, height, .. } => (*width, *height),
            CanvasDimensions::Pixels { width, height } => (
                f64::from(*width) * 25.4 / f64::from(DIGITAL_DPI),
                f64::from(*height) * 25.4 / f64::from(DIGITAL_DPI),
            ),
        }
    }
}

/// The full parameter set for one preview or render request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub dimensions: CanvasDimensions,
    pub layout: LayoutType,
    pub spacing_percent: f64,
    pub background_color: &'static str,
    pub maintain_aspect_ratio: bool,
    pub output_format: OutputFormat,
}

impl ResolvedParams {
    /// Previews always render as jpeg to stay fast and cheap, regardless of
    /// the selected output format. The background color still follows the
    /// user's format selection.
    pub fn preview_variant(&self) -> ResolvedParams {
        ResolvedParams {
            output_format: OutputFormat::Jpeg,
            ..self.clone()
        }
    }

    /// True when the request targets the millimeter-based endpoints
    pub fn is_physical(&self) -> bool {
        matches!(self.dimensions, CanvasDimensions::Millimeters { .. })
    }

    /// The literal multipart text fields, in wire order. File parts are
    /// appended separately by the API client.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(12);
        match self.dimensions {
            CanvasDimensions::Millimeters { width, height, dpi } => {
                fields.push(("width_mm", width.to_string()));
                fields.push(("height_mm", height.to_string()));
                fields.push(("dpi", dpi.to_string()));
            }
            CanvasDimensions::Pixels { width, height } => {
                fields.push(("width_px", width.to_string()));
                fields.push(("height_px", height.to_string()));
                fields.push(("dpi", DIGITAL_DPI.to_string()));
            }
        }
        fields.push(("layout_style", self.layout.wire_name().to_string()));
        fields.push(("spacing", self.spacing_percent.to_string()));
        fields.push(("background_color", self.background_color.to_string()));
        fields.push((
            "maintain_aspect_ratio",
            self.maintain_aspect_ratio.to_string(),
        ));
        fields.push(("apply_shadow", "false".to_string()));
        fields.push(("output_format", self.output_format.wire_name().to_string()));
        fields.push(("pretrim_borders", "false".to_string()));
        fields.push(("face_aware_cropping", "false".to_string()));
        fields.push(("face_margin", "0.08".to_string()));
        fields
    }
}

/// Everything the configuration form holds. The app struct owns one of
/// these; `resolve` turns it into request parameters (or `None` while the
/// dimensions are incomplete).
#[derive(Debug, Clone, PartialEq)]
pub struct CollageConfig {
    pub canvas_type: CanvasType,
    pub size_preset: String,
    pub custom_width: String,
    pub custom_height: String,
    pub resolution: String,
    pub format: String,
    pub transparency: bool,
    pub layout: LayoutType,
    pub maintain_aspect_ratio: bool,
    /// Spacing as a fraction in 0.0..=0.3 (the slider's range)
    pub spacing: f64,
}

impl Default for CollageConfig {
    fn default() -> Self {
        CollageConfig {
            canvas_type: CanvasType::Print,
            size_preset: CUSTOM_DIMENSIONS.to_string(),
            custom_width: String::new(),
            custom_height: String::new(),
            resolution: DEFAULT_RESOLUTION.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            transparency: false,
            layout: LayoutType::Masonry,
            maintain_aspect_ratio: true,
            spacing: 0.03,
        }
    }
}

impl CollageConfig {
    /// The preset list matching the current canvas type
    pub fn size_presets(&self) -> &'static [&'static str] {
        match self.canvas_type {
            CanvasType::Print => PRINT_SIZE_PRESETS,
            CanvasType::Digital => DIGITAL_SIZE_PRESETS,
        }
    }

    /// Whether the custom width/height inputs are active
    pub fn uses_custom_dimensions(&self) -> bool {
        self.size_preset == CUSTOM_DIMENSIONS
    }

    pub fn output_format(&self) -> OutputFormat {
        parse_output_format(&self.format)
    }

    /// Width/height in the unit implied by the canvas type, or `None`
    /// while the active input does not parse.
    pub fn dimensions(&self) -> Option<(f64, f64)> {
        if self.uses_custom_dimensions() {
            let width = parse_custom_dimension(&self.custom_width)?;
            let height = parse_custom_dimension(&self.custom_height)?;
            Some((width, height))
        } else {
            parse_preset_dimensions(&self.size_preset, self.canvas_type)
        }
    }

    /// Resolve the form into literal request parameters. Returns `None`
    /// when either dimension is unresolved, which suppresses the request.
    pub fn resolve(&self) -> Option<ResolvedParams> {
        let (width, height) = self.dimensions()?;
        let dimensions = match self.canvas_type {
            CanvasType::Print => CanvasDimensions::Millimeters {
                width,
                height,
                dpi: parse_dpi(&self.resolution),
            },
            CanvasType::Digital => CanvasDimensions::Pixels {
                width: width.round() as u32,
                height: height.round() as u32,
            },
        };
        let output_format = self.output_format();
        Some(ResolvedParams {
            dimensions,
            layout: self.layout,
            spacing_percent: spacing_percent(self.spacing),
            background_color: background_color(output_format, self.transparency),
            maintain_aspect_ratio: self.maintain_aspect_ratio,
            output_format,
        })
    }

    /// Switching canvas type resets the size selection, since presets are
    /// unit-specific.
    pub fn set_canvas_type(&mut self, canvas_type: CanvasType) {
        self.canvas_type = canvas_type;
        self.size_preset = CUSTOM_DIMENSIONS.to_string();
        self.custom_width.clear();
        self.custom_height.clear();
        self.resolution = DEFAULT_RESOLUTION.to_string();
    }

    /// Transparency only makes sense for PNG output
    pub fn set_format(&mut self, format: String) {
        if !format.starts_with("PNG") {
            self.transparency = false;
        }
        self.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_print_preset_parses_to_mm() {
        for preset in PRINT_SIZE_PRESETS {
            if *preset == CUSTOM_DIMENSIONS {
                continue;
            }
            let (width, height) = parse_preset_dimensions(preset, CanvasType::Print)
                .unwrap_or_else(|| panic!("preset failed to parse: {preset}"));

            // Labels are cm, wire values are mm
            let (label_w, label_h) = extract_dimension_pair(preset).unwrap();
            assert_eq!(width.min(height), (label_w.min(label_h) * 10.0));
            assert_eq!(width.max(height), (label_w.max(label_h) * 10.0));

            // Stated orientation wins
            if preset.contains("(Portrait)") {
                assert!(width <= height, "expected portrait for {preset}");
            }
            if preset.contains("(Landscape)") {
                assert!(width >= height, "expected landscape for {preset}");
            }
        }
    }

    #[test]
    fn test_orientation_suffix_overrides_numeric_order() {
        // Numbers say portrait, label says landscape: swap
        let (w, h) = parse_preset_dimensions("9x13cm (Landscape)", CanvasType::Print).unwrap();
        assert_eq!((w, h), (130.0, 90.0));

        // Numbers say landscape, label says portrait: swap
        let (w, h) = parse_preset_dimensions("13x9cm (Portrait)", CanvasType::Print).unwrap();
        assert_eq!((w, h), (90.0, 130.0));

        // Agreeing label is left alone
        let (w, h) = parse_preset_dimensions("40x30cm (Landscape)", CanvasType::Print).unwrap();
        assert_eq!((w, h), (400.0, 300.0));
    }

    #[test]
    fn test_a_series_presets_keep_decimals() {
        let (w, h) = parse_preset_dimensions("21x29.7cm A4 (Portrait)", CanvasType::Print).unwrap();
        assert_eq!((w, h), (210.0, 297.0));

        let (w, h) =
            parse_preset_dimensions("42.0x29.7cm A3 (Landscape)", CanvasType::Print).unwrap();
        assert_eq!((w, h), (420.0, 297.0));
    }

    #[test]
    fn test_digital_presets_parse_as_pixels() {
        for preset in DIGITAL_SIZE_PRESETS {
            if *preset == CUSTOM_DIMENSIONS {
                continue;
            }
            let (width, height) = parse_preset_dimensions(preset, CanvasType::Digital)
                .unwrap_or_else(|| panic!("preset failed to parse: {preset}"));
            assert!(width >= 1.0 && height >= 1.0, "bad pixels in {preset}");
        }

        let (w, h) =
            parse_preset_dimensions("YouTube Thumbnail 1280x720", CanvasType::Digital).unwrap();
        assert_eq!((w, h), (1280.0, 720.0));
    }

    #[test]
    fn test_parse_dpi() {
        assert_eq!(parse_dpi("300 DPI (High)"), 300);
        assert_eq!(parse_dpi("150 DPI (Standard)"), 150);
        assert_eq!(parse_dpi("96 DPI (Screen)"), 96);
        assert_eq!(parse_dpi("72dpi"), 72);
        // No match falls back to 150
        assert_eq!(parse_dpi("retina"), 150);
        assert_eq!(parse_dpi(""), 150);
    }

    #[test]
    fn test_custom_dimension_parsing() {
        assert_eq!(parse_custom_dimension("400"), Some(400.0));
        assert_eq!(parse_custom_dimension(" 29.7 "), Some(29.7));
        assert_eq!(parse_custom_dimension(""), None);
        assert_eq!(parse_custom_dimension("abc"), None);
        assert_eq!(parse_custom_dimension("NaN"), None);
        assert_eq!(parse_custom_dimension("inf"), None);
        assert_eq!(parse_custom_dimension("-10"), None);
        assert_eq!(parse_custom_dimension("0"), None);
    }

    #[test]
    fn test_spacing_percent() {
        assert_eq!(spacing_percent(0.037), 3.7);
        assert_eq!(spacing_percent(0.3), 30.0);
        assert_eq!(spacing_percent(0.0), 0.0);
        // Clamped even for out-of-range fractions
        assert_eq!(spacing_percent(2.0), 100.0);
        assert_eq!(spacing_percent(-0.5), 0.0);
        // Two-decimal rounding
        assert_eq!(spacing_percent(0.03333), 3.33);
    }

    #[test]
    fn test_spacing_serializes_without_trailing_zeros() {
        assert_eq!(spacing_percent(0.037).to_string(), "3.7");
        assert_eq!(spacing_percent(0.3).to_string(), "30");
    }

    #[test]
    fn test_background_color() {
        assert_eq!(background_color(OutputFormat::Png, true), "#00000000");
        assert_eq!(background_color(OutputFormat::Png, false), "#FFFFFF");
        // Transparency is ignored for non-png formats
        assert_eq!(background_color(OutputFormat::Jpeg, true), "#FFFFFF");
        assert_eq!(background_color(OutputFormat::Tiff, true), "#FFFFFF");
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(
            parse_output_format("PNG (Transparency)"),
            OutputFormat::Png
        );
        assert_eq!(
            parse_output_format("TIFF (Print Quality)"),
            OutputFormat::Tiff
        );
        assert_eq!(
            parse_output_format("JPEG (Smallest File Size)"),
            OutputFormat::Jpeg
        );
        assert_eq!(parse_output_format("anything else"), OutputFormat::Jpeg);
    }

    #[test]
    fn test_output_format_extensions() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Tiff.extension(), "tiff");
    }

    #[test]
    fn test_resolve_suppressed_while_custom_input_invalid() {
        let mut config = CollageConfig::default();
        assert!(config.resolve().is_none(), "empty inputs must not resolve");

        config.custom_width = "400".to_string();
        assert!(config.resolve().is_none(), "one axis missing must not resolve");

        config.custom_height = "300".to_string();
        assert!(config.resolve().is_some());

        config.custom_height = "oops".to_string();
        assert!(config.resolve().is_none());
    }

    #[test]
    fn test_resolve_print_preset_form_fields() {
        let config = CollageConfig {
            size_preset: "40x30cm (Landscape)".to_string(),
            spacing: 0.03,
            ..CollageConfig::default()
        };
        let params = config.resolve().unwrap();
        assert!(params.is_physical());

        let fields = params.form_fields();
        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or_else(|| panic!("missing field {name}"))
        };
        assert_eq!(get("width_mm"), "400");
        assert_eq!(get("height_mm"), "300");
        assert_eq!(get("dpi"), "150");
        assert_eq!(get("layout_style"), "masonry");
        assert_eq!(get("spacing"), "3");
        assert_eq!(get("background_color"), "#FFFFFF");
        assert_eq!(get("maintain_aspect_ratio"), "true");
        assert_eq!(get("apply_shadow"), "false");
        assert_eq!(get("output_format"), "jpeg");
        assert_eq!(get("pretrim_borders"), "false");
        assert_eq!(get("face_aware_cropping"), "false");
        assert_eq!(get("face_margin"), "0.08");
    }

    #[test]
    fn test_resolve_digital_rounds_pixels() {
        let config = CollageConfig {
            canvas_type: CanvasType::Digital,
            custom_width: "1919.6".to_string(),
            custom_height: "1080.2".to_string(),
            ..CollageConfig::default()
        };
        let params = config.resolve().unwrap();
        assert!(!params.is_physical());
        assert_eq!(
            params.dimensions,
            CanvasDimensions::Pixels {
                width: 1920,
                height: 1080
            }
        );

        let fields = params.form_fields();
        assert!(fields.contains(&("width_px", "1920".to_string())));
        assert!(fields.contains(&("height_px", "1080".to_string())));
        // Digital always reports 96 dpi
        assert!(fields.contains(&("dpi", "96".to_string())));
    }

    #[test]
    fn test_preview_variant_forces_jpeg_but_keeps_background() {
        let config = CollageConfig {
            size_preset: "40x30cm (Landscape)".to_string(),
            format: "PNG (Transparency)".to_string(),
            transparency: true,
            ..CollageConfig::default()
        };
        let params = config.resolve().unwrap();
        assert_eq!(params.output_format, OutputFormat::Png);
        assert_eq!(params.background_color, "#00000000");

        let preview = params.preview_variant();
        assert_eq!(preview.output_format, OutputFormat::Jpeg);
        assert_eq!(preview.background_color, "#00000000");
    }

    #[test]
    fn test_pixel_canvas_converts_to_mm_at_96_dpi() {
        let dims = CanvasDimensions::Pixels {
            width: 960,
            height: 96,
        };
        let (w_mm, h_mm) = dims.size_mm();
        assert!((w_mm - 254.0).abs() < 1e-9);
        assert!((h_mm - 25.4).abs() < 1e-9);
        assert_eq!(dims.dpi(), 96);
    }

    #[test]
    fn test_canvas_type_switch_resets_size_selection() {
        let mut config = CollageConfig {
            size_preset: "40x30cm (Landscape)".to_string(),
            custom_width: "400".to_string(),
            resolution: "300 DPI (High)".to_string(),
            ..CollageConfig::default()
        };
        config.set_canvas_type(CanvasType::Digital);
        assert_eq!(config.size_preset, CUSTOM_DIMENSIONS);
        assert!(config.custom_width.is_empty());
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
    }

    #[test]
    fn test_leaving_png_clears_transparency() {
        let mut config = CollageConfig {
            format: "PNG (Transparency)".to_string(),
            transparency: true,
            ..CollageConfig::default()
        };
        config.set_format("JPEG (Smallest File Size)".to_string());
        assert!(!config.transparency);
    }
}
