use super::schema::{
    DefaultValue as D, EndpointDescriptor, OutputKind, ParamKind as K, ParamSpec as P,
    SecondaryInput,
};

const POSITIONS: &[&str] = &[
    "top-left",
    "top-right",
    "bottom-left",
    "bottom-right",
    "center",
];
const OUTPUT_FORMATS: &[&str] = &["png", "jpeg", "webp", "gif", "bmp"];
const FRAME_FORMATS: &[&str] = &["png", "jpeg"];
const FILTERS: &[&str] = &[
    "grayscale",
    "sepia",
    "invert",
    "blur",
    "sharpen",
    "emboss",
    "edge",
];
const BLEND_MODES: &[&str] = &[
    "normal", "multiply", "screen", "overlay", "darken", "lighten",
];
const RESIZE_MODES: &[&str] = &["fit", "fill", "stretch"];

const SAMPLE_LANDSCAPE: &str = "https://samples.imgtools.dev/landscape.jpg";
const SAMPLE_PORTRAIT: &str = "https://samples.imgtools.dev/portrait.png";
const SAMPLE_TEXTURE: &str = "https://samples.imgtools.dev/texture.png";
const SAMPLE_ANIMATION: &str = "https://samples.imgtools.dev/spinner.gif";

const WATERMARK_PARAMS: &[P] = &[
    P::new("text", K::Text, "Watermark text").default_value(D::Str("imgtools")),
    P::new("font_size", K::Integer, "Font size in pixels")
        .range(8.0, 200.0)
        .default_value(D::Integer(36)),
    P::new("color", K::Color, "Text colour").default_value(D::Str("#FFFFFF")),
    P::new("opacity", K::Float, "Watermark opacity")
        .range(0.0, 1.0)
        .default_value(D::Float(0.5)),
    P::new("position", K::Choice, "Anchor position")
        .options(POSITIONS)
        .default_value(D::Str("bottom-right")),
    P::new("tile", K::Boolean, "Repeat the watermark across the image")
        .default_value(D::Bool(false)),
];

const RESIZE_PARAMS: &[P] = &[
    P::new("width", K::Integer, "Target width in pixels")
        .range(1.0, 10_000.0)
        .default_value(D::Integer(800)),
    P::new("height", K::Integer, "Target height in pixels")
        .range(1.0, 10_000.0)
        .default_value(D::Integer(600)),
    P::new("keep_aspect_ratio", K::Boolean, "Preserve the aspect ratio")
        .default_value(D::Bool(true)),
    P::new("mode", K::Choice, "How the image fills the target box")
        .options(RESIZE_MODES)
        .default_value(D::Str("fit")),
];

const CROP_PARAMS: &[P] = &[
    P::new("x", K::Integer, "Left edge")
        .range(0.0, 10_000.0)
        .default_value(D::Integer(0)),
    P::new("y", K::Integer, "Top edge")
        .range(0.0, 10_000.0)
        .default_value(D::Integer(0)),
    P::new("width", K::Integer, "Region width")
        .range(1.0, 10_000.0)
        .default_value(D::Integer(400)),
    P::new("height", K::Integer, "Region height")
        .range(1.0, 10_000.0)
        .default_value(D::Integer(300)),
];

const ROTATE_PARAMS: &[P] = &[
    P::new("angle", K::Float, "Clockwise rotation in degrees")
        .range(-360.0, 360.0)
        .default_value(D::Float(90.0)),
    P::new("background", K::Color, "Fill colour for exposed corners")
        .default_value(D::Str("#000000")),
    P::new("expand", K::Boolean, "Grow the canvas to fit the rotated image")
        .default_value(D::Bool(true)),
];

const COMPRESS_PARAMS: &[P] = &[
    P::new("quality", K::Integer, "Encoder quality")
        .range(1.0, 100.0)
        .default_value(D::Integer(80)),
    P::new("format", K::Choice, "Output format")
        .options(&["jpeg", "webp", "png"])
        .default_value(D::Str("jpeg")),
];

const CONVERT_PARAMS: &[P] = &[P::new("format", K::Choice, "Output format")
    .options(OUTPUT_FORMATS)
    .default_value(D::Str("png"))];

const FILTER_PARAMS: &[P] = &[
    P::new("filter", K::Choice, "Filter to apply")
        .options(FILTERS)
        .default_value(D::Str("grayscale")),
    P::new("intensity", K::Float, "Filter strength")
        .range(0.0, 1.0)
        .default_value(D::Float(1.0)),
];

const ADJUST_PARAMS: &[P] = &[
    P::new("brightness", K::Float, "Brightness offset")
        .range(-100.0, 100.0)
        .default_value(D::Float(0.0)),
    P::new("contrast", K::Float, "Contrast offset")
        .range(-100.0, 100.0)
        .default_value(D::Float(0.0)),
    P::new("saturation", K::Float, "Saturation offset")
        .range(-100.0, 100.0)
        .default_value(D::Float(0.0)),
];

const BORDER_PARAMS: &[P] = &[
    P::new("width", K::Integer, "Border width in pixels")
        .range(1.0, 500.0)
        .default_value(D::Integer(10)),
    P::new("color", K::Color, "Border colour").default_value(D::Str("#FFFFFF")),
];

const BLEND_PARAMS: &[P] = &[
    P::new("mode", K::Choice, "Blend mode")
        .options(BLEND_MODES)
        .default_value(D::Str("normal")),
    P::new("opacity", K::Float, "Overlay opacity")
        .range(0.0, 1.0)
        .default_value(D::Float(0.5)),
];

const GIF_FRAMES_PARAMS: &[P] = &[
    P::new("frames", K::Frames, "Frame indices to export, empty for all")
        .default_value(D::Str("")),
    P::new("format", K::Choice, "Format of the extracted frames")
        .options(FRAME_FORMATS)
        .default_value(D::Str("png")),
];

const GIF_SPEED_PARAMS: &[P] = &[P::new("speed", K::Float, "Playback speed multiplier")
    .range(0.1, 10.0)
    .default_value(D::Float(1.0))];

const fn tool(
    name: &'static str,
    title: &'static str,
    description: &'static str,
    params: &'static [P],
    samples: &'static [&'static str],
) -> EndpointDescriptor {
    EndpointDescriptor {
        name,
        title,
        description,
        method: "POST",
        params,
        samples,
        secondary: None,
        output: OutputKind::Image,
    }
}

pub(super) static TOOLS: &[EndpointDescriptor] = &[
    tool(
        "watermark",
        "Text watermark",
        "Stamps a text watermark onto the image.",
        WATERMARK_PARAMS,
        &[SAMPLE_LANDSCAPE, SAMPLE_PORTRAIT],
    ),
    tool(
        "resize",
        "Resize",
        "Scales the image to the requested dimensions.",
        RESIZE_PARAMS,
        &[SAMPLE_LANDSCAPE],
    ),
    tool(
        "crop",
        "Crop",
        "Cuts a rectangular region out of the image.",
        CROP_PARAMS,
        &[SAMPLE_LANDSCAPE],
    ),
    tool(
        "rotate",
        "Rotate",
        "Rotates the image by an arbitrary angle.",
        ROTATE_PARAMS,
        &[SAMPLE_PORTRAIT],
    ),
    tool(
        "compress",
        "Compress",
        "Re-encodes the image at a lower quality.",
        COMPRESS_PARAMS,
        &[SAMPLE_LANDSCAPE, SAMPLE_PORTRAIT],
    ),
    tool(
        "convert",
        "Convert format",
        "Converts the image to another container format.",
        CONVERT_PARAMS,
        &[SAMPLE_PORTRAIT],
    ),
    tool(
        "filter",
        "Filters",
        "Applies one of the predefined image filters.",
        FILTER_PARAMS,
        &[SAMPLE_LANDSCAPE, SAMPLE_TEXTURE],
    ),
    tool(
        "adjust",
        "Colour adjustment",
        "Adjusts brightness, contrast and saturation.",
        ADJUST_PARAMS,
        &[SAMPLE_LANDSCAPE],
    ),
    tool(
        "border",
        "Border",
        "Adds a solid border around the image.",
        BORDER_PARAMS,
        &[SAMPLE_PORTRAIT],
    ),
    EndpointDescriptor {
        secondary: Some(SecondaryInput {
            file_field: "overlay",
            url_field: "overlay_url",
            description: "Image blended on top of the base image",
        }),
        ..tool(
            "blend",
            "Blend",
            "Blends a second image over the base image.",
            BLEND_PARAMS,
            &[SAMPLE_LANDSCAPE, SAMPLE_TEXTURE],
        )
    },
    EndpointDescriptor {
        output: OutputKind::Archive,
        ..tool(
            "gif-frames",
            "Extract GIF frames",
            "Exports the selected GIF frames as a zip archive of still images.",
            GIF_FRAMES_PARAMS,
            &[SAMPLE_ANIMATION],
        )
    },
    tool(
        "gif-speed",
        "GIF speed",
        "Changes the playback speed of an animated GIF.",
        GIF_SPEED_PARAMS,
        &[SAMPLE_ANIMATION],
    ),
    tool(
        "gif-reverse",
        "Reverse GIF",
        "Plays an animated GIF backwards.",
        &[],
        &[SAMPLE_ANIMATION],
    ),
];
