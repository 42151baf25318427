//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::Mot;

/// Print every post, newest first
pub fn run(mot: &Mot) -> Result<()> {
    let posts = mot.posts()?;
    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("{}", format_line(post));
    }
    Ok(())
}

fn format_line(post: &Post) -> String {
    let date = if post.date.is_empty() { "-" } else { &post.date };
    format!("  {} - {} [{}]", date, post.title, post.href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let mut post = Post::new();
        post.set_title("Hello World");
        assert_eq!(format_line(&post), "  - - Hello World [post/hello-world.html]");

        post.date = "18/10/2026 - 12:00:00".to_string();
        assert_eq!(
            format_line(&post),
            "  18/10/2026 - 12:00:00 - Hello World [post/hello-world.html]"
        );
    }
}
