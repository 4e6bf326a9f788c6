//! Plain-text rendering of contacts for the terminal.

use rolodex_core::{book::Stats, contact::Contact};

const STAR: &str = "★";

/// One listing row: id, initials, name (starred if favorite), phone, email.
pub fn contact_line(c: &Contact) -> String {
  let mut line = format!("#{:<4} {:<3} {}", c.id, c.initials(), c.name);
  if c.favorite {
    line.push(' ');
    line.push_str(STAR);
  }
  line.push_str("  ");
  line.push_str(&c.phone);
  if let Some(email) = &c.email {
    line.push_str("  ");
    line.push_str(email);
  }
  line
}

/// The full listing, or the appropriate empty-state message.
pub fn listing(contacts: &[Contact], query: &str) -> String {
  if contacts.is_empty() {
    return if query.is_empty() {
      "No contacts yet\nAdd your first contact to get started!".to_string()
    } else {
      format!("No contacts found matching \"{query}\"")
    };
  }
  contacts
    .iter()
    .map(contact_line)
    .collect::<Vec<_>>()
    .join("\n")
}

/// Multi-line view of a single contact.
pub fn detail(c: &Contact) -> String {
  let mut out = format!("{} ({})\n", c.name, c.initials());
  out.push_str(&format!("  id:       {}\n", c.id));
  out.push_str(&format!("  phone:    {}\n", c.phone));
  if let Some(email) = &c.email {
    out.push_str(&format!("  email:    {email}\n"));
  }
  if let Some(image) = &c.profile_image {
    out.push_str(&format!("  image:    {image}\n"));
  }
  out.push_str(&format!(
    "  favorite: {}",
    if c.favorite { "yes" } else { "no" }
  ));
  out
}

pub fn stats_line(stats: Stats) -> String {
  format!(
    "{} contact{}, {} favorite{}",
    stats.total,
    plural(stats.total),
    stats.favorites,
    plural(stats.favorites),
  )
}

fn plural(n: usize) -> &'static str {
  if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
  use rolodex_core::snapshot::sample_contacts;

  use super::*;

  #[test]
  fn favorite_line_has_star_and_email() {
    let john = &sample_contacts()[0];
    let line = contact_line(john);
    assert!(line.starts_with("#1"), "{line}");
    assert!(line.contains("JD"));
    assert!(line.contains("John Doe ★"));
    assert!(line.ends_with("0241234567  john.doe@example.com"));
  }

  #[test]
  fn plain_line_has_no_star() {
    let mut jane = sample_contacts()[1].clone();
    jane.email = None;
    let line = contact_line(&jane);
    assert!(!line.contains(STAR));
    assert!(line.ends_with("Jane Smith  0557654321"), "{line}");
  }

  #[test]
  fn empty_states() {
    assert!(listing(&[], "").starts_with("No contacts yet"));
    assert_eq!(listing(&[], "zed"), "No contacts found matching \"zed\"");
  }

  #[test]
  fn listing_has_one_line_per_contact() {
    assert_eq!(listing(&sample_contacts(), "").lines().count(), 4);
  }

  #[test]
  fn detail_includes_optional_fields_when_present() {
    let david = &sample_contacts()[2];
    let text = detail(david);
    assert!(text.contains("image:"));
    assert!(text.ends_with("favorite: yes"));
  }

  #[test]
  fn stats_pluralise() {
    let line = stats_line(Stats { total: 1, favorites: 0 });
    assert_eq!(line, "1 contact, 0 favorites");
  }
}
