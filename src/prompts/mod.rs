//! Prompt templates for the hosted model. Pure string formatting; the
//! presentation layer validates non-empty input before any of these are used.

/// Empathetic chat assistant prompt.
pub fn chat_prompt(user_query: &str) -> String {
    format!(
        "You are HealthAI, an empathetic healthcare assistant. Provide a clear, \
         kind response to the user's question. Suggest consulting a doctor if needed.\n\n\
         User: {user_query}\n\
         Response:"
    )
}

/// Diagnostic-style prompt listing possible conditions for the symptoms.
pub fn prediction_prompt(symptoms: &str) -> String {
    format!(
        "You are HealthAI, a diagnostic assistant. Based on symptoms, list possible \
         conditions with likelihood and next steps. Suggest consulting a doctor.\n\n\
         Symptoms: {symptoms}\n\
         Output format:\n\
         - Condition: [Name] | Likelihood: [Percentage]% | Next Steps: [Actions]"
    )
}

/// Treatment-plan request for a diagnosed condition.
pub fn treatment_prompt(condition: &str) -> String {
    format!("Suggest a treatment plan for the disease: {condition}")
}

/// Analyst prompt over the statistics summary of an uploaded data set.
pub fn insights_prompt(summary: &str) -> String {
    format!(
        "You are HealthAI, a health analyst. Analyze the patient's health metrics \
         (summary below) and provide insights on trends and recommendations.\n\n\
         Data Summary:\n\
         {summary}\n\
         Insights:"
    )
}
