use crate::error::ReportError;
use crate::models::person::{PersonRecord, StatusTag};

/// Suffix appended to busy units in the field list
const BUSY_SUFFIX: &str = " (مشغول)";

/// One entry of the field list: `- [code ]name[ (busy)]`
fn format_person_line(person: &PersonRecord) -> String {
    let code = person.code.trim();
    let mut line = String::from("- ");
    if !code.is_empty() {
        line.push_str(code);
        line.push(' ');
    }
    line.push_str(person.name.trim());
    if person.status == StatusTag::Busy {
        line.push_str(BUSY_SUFFIX);
    }
    line
}

/// Assemble the operations handover report.
///
/// Everyone not out of service is listed under the field count, and the
/// recipient counts toward that total without being listed. At least one of
/// recipient or deputy must be given.
pub fn generate_report(
    recipient: &str,
    deputy: &str,
    people: &[PersonRecord],
) -> Result<String, ReportError> {
    let recipient = recipient.trim();
    let deputy = deputy.trim();
    if recipient.is_empty() && deputy.is_empty() {
        return Err(ReportError::MissingRecipient);
    }

    let (in_field, out_of_service): (Vec<&PersonRecord>, Vec<&PersonRecord>) =
        people.iter().partition(|p| p.status != StatusTag::Oos);
    let total_field = in_field.len() + usize::from(!recipient.is_empty());

    let names_list = in_field
        .iter()
        .map(|p| format_person_line(p))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "📌 استلام العمليات 📌

المستلم : {recipient}

النائب : {deputy}

عدد و اسماء الوحدات الاسعافيه في الميدان : {{{total_field}}}
{names_list}

خارج الخدمه : ({oos})

🎙️ تم استلام العمليات و جاهزون للتعامل مع البلاغات

الملاحظات : تحديث",
        oos = out_of_service.len(),
    ))
}
