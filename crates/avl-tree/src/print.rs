//! Box-drawing tree printer.

/// Renders one child; receives the indentation its own children must use.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Prints `children` as branches below the current line.
///
/// Trailing `None` entries are dropped; inner ones still take up a slot so
/// the left/right position of the remaining children stays readable.
pub fn print_tree(tab: &str, children: &[Option<&PrintChild<'_>>]) -> String {
    let mut out = String::new();

    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child_opt) in children.iter().enumerate().take(last + 1) {
        let Some(child_fn) = *child_opt else {
            continue;
        };

        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if child.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !child.is_empty() {
            out.push(' ');
            out.push_str(&child);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_children_prints_nothing() {
        assert_eq!(print_tree("", &[]), "");
        assert_eq!(print_tree("", &[None, None]), "");
    }

    #[test]
    fn last_child_gets_closing_branch() {
        let a: &PrintChild = &|_: &str| "a".to_string();
        let b: &PrintChild = &|_: &str| "b".to_string();
        let out = print_tree("", &[Some(a), Some(b)]);
        assert_eq!(out, "\n├─ a\n└─ b");
    }

    #[test]
    fn nested_tab_is_passed_down() {
        let leaf: &PrintChild = &|_: &str| "y".to_string();
        let inner: &PrintChild = &|tab: &str| format!("x{}", print_tree(tab, &[Some(leaf)]));
        let out = print_tree("", &[Some(inner), None]);
        assert_eq!(out, "\n└─ x\n   └─ y");
    }
}
