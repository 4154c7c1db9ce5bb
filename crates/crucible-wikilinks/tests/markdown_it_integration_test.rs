//! End-to-end rendering through markdown-it
//!
//! Covers the documented usage scenarios: default rendering, each option,
//! each hook and a fully custom renderer.

use crucible_wikilinks::escape::encode_attr_value;
use crucible_wikilinks::{
    add_wikilink_plugin, add_wikilink_plugin_with_config, collect_wikilinks, WikilinkConfig,
    WikilinkOptions,
};
use markdown_it::MarkdownIt;

const HOOK_SAMPLE: &str =
    "Vive la [[revolution!]] VIVE LA [[REVOLUTION!!!]]\n\nBut no cb for piped [[/Misc/Cats/Slate|kitty]].";

fn parser_with(config: WikilinkConfig) -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    add_wikilink_plugin_with_config(&mut md, config);
    md
}

fn parser_with_options(options: WikilinkOptions) -> MarkdownIt {
    parser_with(WikilinkConfig::new(options).unwrap())
}

fn render(md: &MarkdownIt, input: &str) -> String {
    md.parse(input).render().trim().to_string()
}

/// Keep word characters and whitespace, lowercase, capitalize first letter
fn capitalize_word(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[test]
fn test_basic_usage() {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    add_wikilink_plugin(&mut md);

    assert_eq!(
        render(&md, "Click [[Wiki Links|here]] to learn about [[/Wiki]] links."),
        "<p>Click <a href=\"./Wiki_Links.html\">here</a> to learn about <a href=\"/Wiki.html\">/Wiki</a> links.</p>"
    );
}

#[test]
fn test_custom_link_pattern() {
    let md = parser_with_options(WikilinkOptions {
        link_pattern: Some(r"\[#([\w\s/!]+)(\|([\w\s/!]+))?#\]".to_string()),
        ..Default::default()
    });

    assert_eq!(
        render(&md, "[#Slate!#]"),
        "<p><a href=\"./Slate!.html\">Slate!</a></p>"
    );
}

#[test]
fn test_base_url() {
    let md = parser_with_options(WikilinkOptions {
        base_url: "/wiki/".to_string(),
        ..Default::default()
    });

    assert_eq!(
        render(&md, "[[Main Page]] and also [[/fake-rooty page?]]"),
        "<p><a href=\"./Main_Page.html\">Main Page</a> and also <a href=\"/wiki/fake-rooty_page.html\">/fake-rooty page?</a></p>"
    );
}

#[test]
fn test_default_base_url_with_sanitized_page() {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    add_wikilink_plugin(&mut md);

    assert_eq!(
        render(&md, "[[/fake-rooty page?]]"),
        "<p><a href=\"/fake-rooty_page.html\">/fake-rooty page?</a></p>"
    );
}

#[test]
fn test_relative_base_url() {
    let md = parser_with_options(WikilinkOptions {
        relative_base_url: "#".to_string(),
        ..Default::default()
    });

    assert_eq!(
        render(&md, "[[Main Page]] and [[super/sub]]"),
        "<p><a href=\"#Main_Page.html\">Main Page</a> and <a href=\"#super/sub.html\">super/sub</a></p>"
    );
}

#[test]
fn test_make_all_links_absolute() {
    let md = parser_with_options(WikilinkOptions {
        make_all_links_absolute: true,
        base_url: "/wiki/".to_string(),
        relative_base_url: "#".to_string(),
        ..Default::default()
    });

    assert_eq!(
        render(&md, "[[Main Page]] and also [[/fake-rooty page]]"),
        "<p><a href=\"/wiki/Main_Page.html\">Main Page</a> and also <a href=\"/wiki/fake-rooty_page.html\">/fake-rooty page</a></p>"
    );
}

#[test]
fn test_uri_suffix() {
    let md = parser_with_options(WikilinkOptions {
        uri_suffix: ".php".to_string(),
        ..Default::default()
    });

    assert_eq!(
        render(&md, "[[Main Page]]"),
        "<p><a href=\"./Main_Page.php\">Main Page</a></p>"
    );
}

#[test]
fn test_html_attributes() {
    let toml = "[html_attributes]\nclass = \"wikilink\"\nrel = \"nofollow\"\n";
    let md = parser_with_options(WikilinkOptions::from_toml_str(toml).unwrap());

    assert_eq!(
        render(&md, "[[Main Page]]"),
        "<p><a href=\"./Main_Page.html\" class=\"wikilink\" rel=\"nofollow\">Main Page</a></p>"
    );
}

#[test]
fn test_page_name_generator() {
    let md = parser_with(WikilinkConfig::default().with_page_name_generator(|label| {
        label
            .split('/')
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" : ")
    }));

    assert_eq!(
        render(&md, HOOK_SAMPLE),
        "<p>Vive la <a href=\"./Revolution.html\">revolution!</a> VIVE LA <a href=\"./Revolution.html\">REVOLUTION!!!</a></p>\n<p>But no cb for piped <a href=\"/Misc/Cats/Slate.html\">kitty</a>.</p>"
    );
}

#[test]
fn test_page_name_post_processor() {
    let md = parser_with(WikilinkConfig::default().with_page_name_post_processor(|page| {
        page.split('/')
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join("/")
    }));

    assert_eq!(
        render(&md, HOOK_SAMPLE),
        "<p>Vive la <a href=\"./Revolution.html\">revolution!</a> VIVE LA <a href=\"./Revolution.html\">REVOLUTION!!!</a></p>\n<p>But no cb for piped <a href=\"/Misc/Cats/Slate.html\">kitty</a>.</p>"
    );
}

#[test]
fn test_label_post_processor() {
    let md = parser_with(WikilinkConfig::default().with_label_post_processor(capitalize_word));

    assert_eq!(
        render(&md, HOOK_SAMPLE),
        "<p>Vive la <a href=\"./revolution!.html\">Revolution</a> VIVE LA <a href=\"./REVOLUTION!!!.html\">Revolution</a></p>\n<p>But no cb for piped <a href=\"/Misc/Cats/Slate.html\">Kitty</a>.</p>"
    );
}

#[test]
fn test_custom_renderer_with_original_values() {
    let config = WikilinkConfig::default()
        .with_label_post_processor(|label| label.replacen('!', "!!!", 1))
        .with_page_name_post_processor(|page| {
            match page.chars().next() {
                Some(first) if first.is_ascii_lowercase() || first == '_' || first == '-' => {
                    page[first.len_utf8()..].to_string()
                }
                _ => page.to_string(),
            }
        })
        .with_renderer(|link, _config| {
            let attrs = link
                .html_attrs
                .iter()
                .filter(|attr| !attr.starts_with("href="))
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "<linkComponent pageName=\"{}\" originalLabel=\"{}\" sourceUrl=\"{}\" {}>{}</linkComponent>",
                encode_attr_value(&link.original_page_name),
                encode_attr_value(&link.original_label),
                encode_attr_value(&link.href),
                attrs,
                link.label
            )
        });
    let md = parser_with(config);

    assert_eq!(
        render(
            &md,
            "Click [[Wiki Links|here]] to learn about [[/Wiki]] links: [[for various purposes!|A|B]]."
        ),
        "<p>Click <linkComponent pageName=\"Wiki Links\" originalLabel=\"here\" sourceUrl=\"./Wiki Links.html\" >here</linkComponent> \
         to learn about <linkComponent pageName=\"/Wiki\" originalLabel=\"/Wiki\" sourceUrl=\"/Wiki.html\" >/Wiki</linkComponent> \
         links: <linkComponent pageName=\"for various purposes!\" originalLabel=\"A|B\" sourceUrl=\"./or various purposes!.html\" >A|B</linkComponent>.</p>"
    );
}

#[test]
fn test_nested_wikilinks() {
    let md = parser_with(WikilinkConfig::default());
    let input = "[[outer [[inner]] more]]";

    assert_eq!(
        render(&md, input),
        "<p><a href=\"./outer_[[inner.html\">outer [[inner</a> more]]</p>"
    );

    let links = collect_wikilinks(&md.parse(input));
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].original_label, "outer [[inner");
}

#[test]
fn test_three_level_nesting() {
    let md = parser_with(WikilinkConfig::default());

    assert_eq!(
        render(&md, "[[a [[b [[c]] d]] e]]"),
        "<p><a href=\"./a_[[b_[[c.html\">a [[b [[c</a> d]] e]]</p>"
    );
}

#[test]
fn test_rendered_output_does_not_match_again() {
    let md = parser_with(WikilinkConfig::default());
    let html = render(&md, "[[Main Page]]");
    assert_eq!(html, "<p><a href=\"./Main_Page.html\">Main Page</a></p>");

    assert!(collect_wikilinks(&md.parse(&html)).is_empty());
}

#[test]
fn test_separate_documents_do_not_interfere() {
    let md = parser_with(WikilinkConfig::default());

    // The first document ends on a long accepted match; the second starts
    // with a link at an offset inside that span
    let first = render(&md, "[[A rather long page name here]]");
    let second = render(&md, "x [[B]]");

    assert!(first.contains("./A_rather_long_page_name_here.html"));
    assert_eq!(second, "<p>x <a href=\"./B.html\">B</a></p>");
}

#[test]
fn test_paragraphs_do_not_interfere() {
    let md = parser_with(WikilinkConfig::default());

    assert_eq!(
        render(&md, "[[A rather long page name]]\n\nx [[B]]"),
        "<p><a href=\"./A_rather_long_page_name.html\">A rather long page name</a></p>\n<p>x <a href=\"./B.html\">B</a></p>"
    );
}

#[test]
fn test_config_shared_across_threads() {
    let config = std::sync::Arc::new(WikilinkConfig::default());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let config = std::sync::Arc::clone(&config);
            std::thread::spawn(move || {
                let md = parser_with(WikilinkConfig::clone(&config));
                render(&md, &format!("[[Page {i}]]"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("<p><a href=\"./Page_{i}.html\">Page {i}</a></p>")
        );
    }
}
