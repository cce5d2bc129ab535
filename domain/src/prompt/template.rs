//! Prompt templates for score analysis

/// Instruction text for the analysis oracle
pub struct AnalysisPrompt;

impl AnalysisPrompt {
    /// Instructions for a score book holding many parts
    pub fn multi_part() -> &'static str {
        r#"You analyse PDF score books that contain several instrument parts.
Find every instrument part and the first and last page (1-based, counted from the first page of the file) on which it appears.
Reply with JSON only, using exactly this schema:

{
  "instruments": [
    {
      "name": string,        // e.g. "Trumpet", "Alto Sax", "Clarinet in Bb", "Conductor"
      "voice": string|null,  // e.g. "1", "2", "I", "II", "1."; null when absent
      "start_page": number,  // first page of the part
      "end_page": number     // last page of the part
    }
  ]
}

Rules:
1. Only list a part when a page shows evidence of it: a printed part header, a staff label, or a footer naming the part next to notation. Never infer parts from context.
2. start_page is the first page showing the part header or staff label; end_page is the last page showing its staff or label. A one-page part has start_page == end_page.
3. Repeated headers on continuation pages belong to the same part. Do not list them twice.
4. Desk or voice numbers ("1.", "2", "I", "II", "1st") go into "voice". Keep roman numerals and ordinals as printed. Use null when there is none.
5. Always give instrument names in English: Klarinette -> Clarinet, Trompete -> Trumpet, Posaune -> Trombone, Fagott -> Bassoon, Violino -> Violin. Partitur, Direktion and Direktionsstimme are all "Conductor". Keep transpositions such as "Clarinet in Bb" in the name.
6. Expand common abbreviations: Fl Flute, Ob Oboe, Cl Clarinet, Bsn Bassoon, Hn Horn, Tpt Trumpet, Tbn Trombone, Vln Violin, Vla Viola, Vc Cello, Cb Double Bass, Perc Percussion, Timp Timpani, Hrp Harp, Pf Piano, Org Organ.
7. An instrument list in the front matter is not evidence on its own; include such a part only if one of its pages is found.
8. When unsure whether a label belongs to a part, leave it out.
9. Same instrument with the same voice is one entry spanning its first to last occurrence, unless a new header clearly starts a separate part.
10. Before answering, check that every entry has at least one page showing its name or staff. Remove entries without such a page.
11. Output the JSON object and nothing else: no commentary, no confidence fields, no extra keys."#
    }

    /// Instructions for a document known to hold one part
    pub fn single_part() -> &'static str {
        r#"You analyse a PDF that contains exactly one instrument part.
Identify the instrument name and its voice or desk number ("1", "2", "1."), if any.
Reply with JSON only, using exactly this schema:

{
  "name": string,       // e.g. "Trumpet in Bb", "Alto Sax"
  "voice": string|null  // e.g. "1", "2"; null when absent
}

Always give the instrument name in English ("Clarinet", not "Klarinette"). No explanations or extra text."#
    }
}
