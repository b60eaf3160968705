//! Scoring prompt builder.
//!
//! Produces the single textual instruction sent to the scorer for one
//! question. The instruction pins the reply to a strict JSON object with
//! exactly the contract keys `punkte` and `begruendung`.

/// Build the scoring instruction for one (question, pattern, answer) triple.
///
/// All three texts are embedded verbatim; empty answers pass through as-is.
pub fn build_scoring_prompt(question: &str, pattern: &str, answer: &str) -> String {
    format!(
        r#"Du bist ein strenger technischer Auditor.
Frage: "{question}"
Muster: "{pattern}"
Antwort: "{answer}"
Bewerte nach Härteskala (0=Falsch, 100=Perfekt).
Antworte ausschließlich mit einem JSON-Objekt mit genau diesen Feldern:
{{ "punkte": Zahl, "begruendung": "Kurzer Satz" }}"#
    )
}
