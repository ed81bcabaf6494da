//! Category display formatting

use crate::models::Category;

/// Format a simple list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let title_width = categories
        .iter()
        .map(|c| c.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {}\n",
        "ID",
        "Title",
        "Created",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<title_width$}  {:-<10}\n",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<12}  {:<title_width$}  {}\n",
            category.id.short(),
            category.title,
            category.created_at.format("%Y-%m-%d"),
            title_width = title_width,
        ));
    }

    output
}
