use askama::Template;

pub struct Swatch {
    pub shade: u16,
    pub color: String,
    pub label_color: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct PalettePageTemplate {
    pub base_color: String,
    pub color_name: String,
    pub error: Option<String>,
    pub swatches: Vec<Swatch>,
    pub tailwind_config: Option<String>,
}
