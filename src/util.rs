const NOTION_PAGE_BASE: &str = "https://www.notion.so/";

pub fn notion_page_url(page_id: &str) -> Option<String> {
    let compact = page_id.trim().replace('-', "");
    if compact.is_empty() {
        None
    } else {
        Some(format!("{NOTION_PAGE_BASE}{compact}"))
    }
}

pub fn split_bullets(text: &str) -> Vec<String> {
    text.split('-')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn extract_notion_id(input: &str) -> String {
    let trimmed = input.trim();
    if !trimmed.contains('/') {
        return trimmed.to_owned();
    }

    let path = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    let last_segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
    let hex = last_segment
        .bytes()
        .rev()
        .take_while(u8::is_ascii_hexdigit)
        .count();

    if hex >= 32 {
        last_segment[last_segment.len() - 32..].to_owned()
    } else {
        last_segment.to_owned()
    }
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn page_urls_drop_dashes() {
        assert_eq!(
            notion_page_url("1f2e3d4c-5b6a-7980-a1b2-c3d4e5f60718").as_deref(),
            Some("https://www.notion.so/1f2e3d4c5b6a7980a1b2c3d4e5f60718")
        );
        assert_eq!(notion_page_url("  "), None);
        assert_eq!(notion_page_url("---"), None);
    }

    #[test]
    fn bullets_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_bullets("- Assign roles - Set priorities -  "),
            vec!["Assign roles".to_owned(), "Set priorities".to_owned()]
        );
        assert_eq!(split_bullets("single duty"), vec!["single duty".to_owned()]);
        assert!(split_bullets(" - - ").is_empty());
    }

    #[test]
    fn ids_are_pulled_out_of_pasted_urls() {
        let id = "0123456789abcdef0123456789abcdef";
        assert_eq!(extract_notion_id(&format!("  {id} ")), id);
        assert_eq!(
            extract_notion_id(&format!("https://www.notion.so/acme/Roles-{id}?v=42")),
            id
        );
        assert_eq!(
            extract_notion_id(&format!("https://www.notion.so/{id}/")),
            id
        );
        assert_eq!(extract_notion_id("https://example.test/short"), "short");
    }

    #[test]
    fn plural_picks_the_right_noun() {
        assert_eq!(plural(1, "role", "roles"), "1 role");
        assert_eq!(plural(0, "role", "roles"), "0 roles");
    }
}
