// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_messy_markdown(size: usize) -> String {
    let base = "# Title\nIntro with \\( a^2 + b^2 \\) inline.\n\n\n\n## Section\n- Bullet point\n\n- Another item\n\n\n- Third\nProse right after the list.   \n\\[\n  \\int_0^1 x\\,dx\n\\]\n```rust\nfn example() {\n\n\n    println!(\"\\( not math \\)\");\n}\n```\n\n\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_document_with_frontmatter(sections: usize) -> String {
    let mut content = String::from("---\ntitle: Benchmark\ntags: [bench]\n---\n");

    for section in 0..sections {
        content.push_str(&format!("# Section {}\n", section));
        content.push_str("Some paragraph content with multiple sentences.\n");
        for i in 0..3 {
            content.push_str(&format!("{}. Item {}\n\n", i + 1, i));
        }
        if section % 3 == 0 {
            content.push_str("```\nlet value = 42;\n```\n");
        }
    }

    content
}
