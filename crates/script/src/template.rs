//! Display-name substitution for script copy.
//!
//! Script text is written with a `{name}` placeholder; personalization is a
//! pure string substitution with no escaping concerns beyond plain text.

use simchat_core::MessageKind;

use crate::persona::Persona;
use crate::step::{Script, Step};

/// Placeholder replaced by the persona display name.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Substitutes the persona name into a single template string.
pub fn render(template: &str, persona: &Persona) -> String {
    template.replace(NAME_PLACEHOLDER, &persona.name)
}

/// Returns a copy of `script` with the persona name substituted into every
/// text field of the tree: bodies, captions, button labels, and choice
/// labels.
pub fn personalize(script: &Script, persona: &Persona) -> Script {
    let mut script = script.clone();
    personalize_steps(&mut script.steps, persona);
    script
}

fn personalize_steps(steps: &mut [Step], persona: &Persona) {
    for step in steps {
        if let Some(body) = &mut step.body {
            match body {
                MessageKind::Text { text } => *text = render(text, persona),
                MessageKind::Image { caption, .. } => {
                    if let Some(caption) = caption {
                        *caption = render(caption, persona);
                    }
                }
                MessageKind::CallToAction { text, label } => {
                    *text = render(text, persona);
                    *label = render(label, persona);
                }
            }
        }
        for choice in &mut step.choices {
            choice.label = render(&choice.label, persona);
            personalize_steps(&mut choice.branch, persona);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::find;
    use crate::step::Choice;

    #[test]
    fn test_render_substitutes_name() {
        let persona = find("luna-costa").unwrap();
        assert_eq!(render("Hi, I'm {name}!", &persona), "Hi, I'm Luna Costa!");
    }

    #[test]
    fn test_render_without_placeholder_is_identity() {
        let persona = find("luna-costa").unwrap();
        assert_eq!(
            render("no placeholder here", &persona),
            "no placeholder here"
        );
    }

    #[test]
    fn test_personalize_reaches_nested_branches() {
        let persona = find("bia-ferraz").unwrap();
        let script = Script::new(
            "t",
            "nested",
            vec![Step::text("Hi, I'm {name}").choices(vec![Choice::new(
                "Tell me more",
                vec![Step::text("{name} has more to show")],
            )])],
        );
        let personalized = personalize(&script, &persona);
        assert_eq!(
            personalized.steps[0].body,
            Some(MessageKind::Text {
                text: "Hi, I'm Bia Ferraz".to_string()
            })
        );
        assert_eq!(
            personalized.steps[0].choices[0].branch[0].body,
            Some(MessageKind::Text {
                text: "Bia Ferraz has more to show".to_string()
            })
        );
    }
}
