//! The html templates, compiled into the binary

use tera::Tera;

/// Load all templates
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("macros.html", include_str!("../../templates/macros.html")),
        ("base.html", include_str!("../../templates/base.html")),
        ("login.html", include_str!("../../templates/login.html")),
        ("register.html", include_str!("../../templates/register.html")),
        ("profile.html", include_str!("../../templates/profile.html")),
        ("list.html", include_str!("../../templates/list.html")),
        ("search.html", include_str!("../../templates/search.html")),
    ])?;

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        let tera = load_templates().unwrap();
        let names: Vec<_> = tera.get_template_names().collect();
        assert!(names.contains(&"profile.html"));
        assert!(names.contains(&"search.html"));
    }
}
