//! Line-oriented output for the non-interactive subcommands.

use std::io::Write;

use postkit::{Comment, PasswordStrength, Post, Profile, User, ValidationResult};

use crate::error::AppError;

/// Write one post as a TSV or JSON line.
///
/// TSV columns: id, user id, title, body. Tabs and newlines inside text are
/// folded to spaces so every post stays on one line.
pub fn write_post<W: Write>(
    post: &Post,
    json_mode: bool,
    buf: &mut String,
    writer: &mut W,
) -> Result<(), AppError> {
    buf.clear();

    if json_mode {
        buf.push_str(&serde_json::to_string(post)?);
    } else {
        buf.push_str(&post.id.to_string());
        buf.push('\t');
        buf.push_str(&post.user_id.to_string());
        buf.push('\t');
        push_field(buf, &post.title);
        buf.push('\t');
        push_field(buf, &post.body);
    }

    buf.push('\n');
    writer.write_all(buf.as_bytes())?;
    Ok(())
}

/// Write one `field: message` line per validation error.
pub fn write_rejection<W: Write>(result: &ValidationResult, writer: &mut W) -> Result<(), AppError> {
    for (field, message) in result.errors() {
        writeln!(writer, "{field}: {message}")?;
    }
    Ok(())
}

pub fn write_profile<W: Write>(profile: &Profile, writer: &mut W) -> Result<(), AppError> {
    let user = &profile.user;
    writeln!(writer, "[{}] {}", profile.initials(), user.name)?;
    writeln!(writer, "@{}", user.username)?;
    writeln!(writer, "{}", user.email)?;
    if let Some(phone) = &user.phone {
        writeln!(writer, "phone:   {phone}")?;
    }
    if let Some(website) = &user.website {
        writeln!(writer, "website: {website}")?;
    }
    if let Some(company) = &user.company {
        writeln!(writer, "company: {}", company.name)?;
    }
    writeln!(writer, "posts:   {}", profile.posts.len())?;

    let mut buf = String::new();
    for post in &profile.posts {
        write_post(post, false, &mut buf, writer)?;
    }
    Ok(())
}

pub fn write_comment<W: Write>(comment: &Comment, writer: &mut W) -> Result<(), AppError> {
    let mut body = String::with_capacity(comment.body.len());
    push_field(&mut body, &comment.body);
    writeln!(
        writer,
        "{}\t{}\t{}\t{}",
        comment.post_id, comment.id, comment.email, body
    )?;
    Ok(())
}

/// TSV columns: id, name, username, email, avatar (empty when absent).
pub fn write_user<W: Write>(user: &User, writer: &mut W) -> Result<(), AppError> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}",
        user.id,
        user.name,
        user.username,
        user.email,
        user.avatar.as_deref().unwrap_or("")
    )?;
    Ok(())
}

pub fn write_strength<W: Write>(strength: &PasswordStrength, writer: &mut W) -> Result<(), AppError> {
    writeln!(writer, "{} ({}/5)", strength.label, strength.score)?;
    Ok(())
}

fn push_field(buf: &mut String, text: &str) {
    buf.extend(text.chars().map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: 3,
            user_id: 1,
            title: "ea molestias".into(),
            body: "et iusto\nsed quo\tiure".into(),
            reactions: None,
        }
    }

    #[test]
    fn tsv_line_folds_whitespace() {
        let mut out = Vec::new();
        let mut buf = String::new();
        write_post(&post(), false, &mut buf, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3\t1\tea molestias\tet iusto sed quo iure\n"
        );
    }

    #[test]
    fn json_line_uses_wire_names() {
        let mut out = Vec::new();
        let mut buf = String::new();
        write_post(&post(), true, &mut buf, &mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn rejection_lists_each_field() {
        let result = ValidationResult::with_error("email", "Email not found");
        let mut out = Vec::new();
        write_rejection(&result, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "email: Email not found\n");
    }

    #[test]
    fn user_line_leaves_missing_avatar_empty() {
        let user = User {
            id: 1,
            name: "Leanne Graham".into(),
            username: "Bret".into(),
            email: "Sincere@april.biz".into(),
            avatar: None,
            phone: None,
            website: None,
            company: None,
            address: None,
        };
        let mut out = Vec::new();
        write_user(&user, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\tLeanne Graham\tBret\tSincere@april.biz\t\n"
        );
    }

    #[test]
    fn strength_line() {
        let mut out = Vec::new();
        write_strength(&postkit::score_password_strength("Aa1!aaaa"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Strong (5/5)\n");
    }
}
