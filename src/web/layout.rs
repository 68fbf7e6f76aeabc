// 页面外壳与内联样式

use super::components::escape_html;

const STYLES: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1200px; padding: 1rem; }
.filters { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
.error { background: #fde2e2; color: #8a1f1f; padding: 0.5rem 1rem; margin-bottom: 1rem; }
.notice { background: #e2ecfd; color: #1f3f8a; padding: 0.5rem 1rem; margin-bottom: 1rem; }
.cardcontainer { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
.moviecard { border: 1px solid #ddd; border-radius: 4px; padding: 0.5rem; }
.moviecard__poster { width: 100%; aspect-ratio: 2 / 3; object-fit: cover; background: #eee; }
.moviecard__title { font-weight: bold; margin-top: 0.5rem; }
.moviecard__meta { color: #666; font-size: 0.9rem; }
.pagination { display: flex; gap: 0.25rem; justify-content: center; margin: 1rem 0; }
.pagination__button { padding: 0.25rem 0.6rem; border: 1px solid #ccc; text-decoration: none; color: inherit; }
.pagination__button.active { background: #333; color: #fff; }
"#;

/// 将页面主体包装成完整的 HTML 文档
pub fn page(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{STYLES}</style>
</head>
<body>
    <h1>{title}</h1>
    {body}
</body>
</html>"#
    )
}
