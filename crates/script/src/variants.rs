//! The funnel variant catalog.
//!
//! The shipped funnels share one schema and differ only in copy and timing
//! constants, so each variant is a constructor returning a data instance,
//! already personalized for the given persona. Every variant here must pass
//! [`Script::validate`]; the catalog test keeps that honest.

use simchat_core::Action;

use crate::persona::Persona;
use crate::step::{Choice, Script, Step};
use crate::template::personalize;

/// Ids of all shipped variants, in catalog order.
pub const VARIANT_IDS: &[&str] = &["preview-funnel", "direct-pitch", "inline-checkout"];

/// The default conversation: greeting, three quick replies, and a
/// call-to-action on the buying path.
pub fn preview_funnel(persona: &Persona) -> Script {
    let cta_branch = vec![Step::call_to_action(
        "Here it comes! Full club access, including a private video call, \
         is open right now.",
        "Secure access",
    )
    .typing(1000)];

    let script = Script::new(
        "preview-funnel",
        "Preview funnel",
        vec![Step::text("Hi, I'm {name}. Want an exclusive sneak peek right now?")
            .typing(1200)
            .post_delay(2000)
            .choices(vec![
                Choice::new("Yes, show me", cta_branch.clone()),
                Choice::new(
                    "How does it work?",
                    vec![Step::text(
                        "The club gives you immediate access to exclusive photos and \
                         videos, plus one private call. Spots are limited.",
                    )
                    .typing(1000)
                    .post_delay(1500)
                    .choices(vec![
                        Choice::new("Sounds good, show me", cta_branch),
                        Choice::new(
                            "Maybe later",
                            vec![Step::text(
                                "No rush! I'll be around whenever you're curious.",
                            )
                            .typing(800)],
                        ),
                    ])],
                ),
                Choice::new(
                    "Just photos for now",
                    vec![Step::text(
                        "The full package has videos and a private call too, and most \
                         people say that's the best part. Worth a look!",
                    )
                    .typing(1000)],
                ),
            ])],
    );
    personalize(&script, persona)
}

/// A shorter, harder pitch: teaser image, one yes/no decision, and a checkout
/// hand-off on yes.
pub fn direct_pitch(persona: &Persona) -> Script {
    let script = Script::new(
        "direct-pitch",
        "Direct pitch",
        vec![
            Step::image(
                "https://cdn.example.com/previews/teaser.jpg",
                Some("A little preview from {name}".to_string()),
            )
            .typing(900)
            .post_delay(800),
            Step::text("That's just the start. Want the rest?")
                .typing(700)
                .post_delay(500)
                .choices(vec![
                    Choice::new(
                        "Yes",
                        vec![
                            Step::call_to_action(
                                "Unlock everything with club access.",
                                "Unlock now",
                            )
                            .typing(800)
                            .post_delay(400),
                            Step::action_step(Action::OpenCheckout),
                        ],
                    ),
                    Choice::new(
                        "No",
                        vec![Step::text("All good, the preview stays free.").typing(600)],
                    ),
                ]),
        ],
    );
    personalize(&script, persona)
}

/// Variant for pages with an inline checkout block: the conversation points
/// the visitor at it instead of opening a separate payment surface.
pub fn inline_checkout(persona: &Persona) -> Script {
    let script = Script::new(
        "inline-checkout",
        "Inline checkout",
        vec![
            Step::text("Hey, it's {name}! The full pack is right below this chat.")
                .typing(900)
                .post_delay(600),
            Step::text("Want me to take you there?")
                .typing(600)
                .post_delay(400)
                .choices(vec![
                    Choice::new(
                        "Take me there",
                        vec![Step::action_step(Action::ScrollToCheckout)],
                    ),
                    Choice::new(
                        "Keep chatting",
                        vec![Step::text("Sure! Browse around, I'll be here.").typing(700)],
                    ),
                ]),
        ],
    );
    personalize(&script, persona)
}

/// All shipped variants, personalized for `persona`.
pub fn all(persona: &Persona) -> Vec<Script> {
    vec![
        preview_funnel(persona),
        direct_pitch(persona),
        inline_checkout(persona),
    ]
}

/// Looks a variant up by id.
pub fn by_id(id: &str, persona: &Persona) -> Option<Script> {
    all(persona).into_iter().find(|s| s.id == id)
}
