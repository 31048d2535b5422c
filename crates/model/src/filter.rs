//! Substring search over canonically-resolved fields.

use crate::key::resolve;
use crate::row::CanonicalRow;

/// Keep the rows where the lowercased query is a substring of the value
/// resolved for at least one field. Each field is a candidate-key priority
/// list fed to `resolve`, so the *column names* match accent- and
/// case-insensitively, while the *values* are compared literally (lowercased
/// but with diacritics intact — "feijao" does not match "Feijão").
///
/// A blank query (after trimming) keeps every row.
pub fn filter_rows<'a>(
    rows: &'a [CanonicalRow],
    query: &str,
    fields: &[Vec<String>],
) -> Vec<&'a CanonicalRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            fields
                .iter()
                .any(|candidates| resolve(row, candidates).to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CanonicalRow {
        CanonicalRow::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn fields(lists: &[&[&str]]) -> Vec<Vec<String>> {
        lists
            .iter()
            .map(|l| l.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn blank_query_keeps_all_rows() {
        let rows = vec![row(&[("Descrição", "Arroz")]), row(&[("Descrição", "Feijão")])];
        let fields = fields(&[&["Descrição"]]);

        assert_eq!(filter_rows(&rows, "", &fields).len(), 2);
        assert_eq!(filter_rows(&rows, "   ", &fields).len(), 2);
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let rows = vec![
            row(&[("Descrição", "Arroz Integral")]),
            row(&[("Descrição", "Feijão")]),
        ];
        let fields = fields(&[&["Descrição"]]);

        let hits = filter_rows(&rows, "ARROZ", &fields);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value("Descrição"), "Arroz Integral");
    }

    #[test]
    fn field_name_matching_is_accent_insensitive_but_values_are_literal() {
        let rows = vec![row(&[("Descrição", "Feijão")])];
        let fields = fields(&[&["Descricao"]]);

        // "Descricao" resolves the "Descrição" column...
        assert_eq!(filter_rows(&rows, "feijão", &fields).len(), 1);
        // ...but the query itself is not de-accented.
        assert!(filter_rows(&rows, "feijao", &fields).is_empty());
    }

    #[test]
    fn match_is_or_across_fields() {
        let rows = vec![
            row(&[("Descrição", "Arroz"), ("Categoria", "Grãos")]),
            row(&[("Descrição", "Sabão"), ("Categoria", "Limpeza")]),
        ];
        let fields = fields(&[&["Descrição"], &["Categoria"]]);

        let hits = filter_rows(&rows, "limpeza", &fields);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value("Descrição"), "Sabão");
    }

    #[test]
    fn unresolvable_fields_match_nothing() {
        let rows = vec![row(&[("a", "1")])];
        let fields = fields(&[&["nope"]]);
        assert!(filter_rows(&rows, "1", &fields).is_empty());
    }
}
