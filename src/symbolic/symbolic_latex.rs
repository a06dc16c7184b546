//! LaTeX rendering of symbolic expressions.
//!
//! Precedence-aware: parentheses are only emitted where the mathematical reading needs
//! them. Symbol names are mapped to Greek letters where they spell one (`mu` → `\mu`),
//! a first underscore starts a subscript (`K_tot` → `K_{tot}`) and trailing primes are
//! kept (`hbar'` → `\hbar'`). Function applications whose arguments are all plain
//! symbols are treated as index tensors: `G(mu, nu)` → `G_{\mu\nu}`.

use crate::symbolic::symbolic_engine::Expr;

/// Greek letter mappings: (name, latex)
static GREEK_LETTERS: &[(&str, &str)] = &[
    ("pi", r"\pi"),
    ("alpha", r"\alpha"),
    ("beta", r"\beta"),
    ("gamma", r"\gamma"),
    ("delta", r"\delta"),
    ("epsilon", r"\epsilon"),
    ("zeta", r"\zeta"),
    ("eta", r"\eta"),
    ("theta", r"\theta"),
    ("kappa", r"\kappa"),
    ("lambda", r"\lambda"),
    ("mu", r"\mu"),
    ("nu", r"\nu"),
    ("xi", r"\xi"),
    ("rho", r"\rho"),
    ("sigma", r"\sigma"),
    ("tau", r"\tau"),
    ("phi", r"\phi"),
    ("chi", r"\chi"),
    ("psi", r"\psi"),
    ("omega", r"\omega"),
    ("Gamma", r"\Gamma"),
    ("Delta", r"\Delta"),
    ("Lambda", r"\Lambda"),
    ("Phi", r"\Phi"),
    ("Psi", r"\Psi"),
    ("Omega", r"\Omega"),
    ("hbar", r"\hbar"),
];

fn greek_to_latex(name: &str) -> Option<&'static str> {
    GREEK_LETTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, latex)| *latex)
}

/// `K_tot` → `K_{tot}`, `kappa_11` → `\kappa_{11}`, `hbar'` → `\hbar'`
pub fn latex_symbol(name: &str) -> String {
    let stem = name.trim_end_matches('\'');
    let primes = &name[stem.len()..];
    let (base, sub) = match stem.split_once('_') {
        Some((base, sub)) if !base.is_empty() && !sub.is_empty() => (base, Some(sub)),
        _ => (stem, None),
    };
    let base = greek_to_latex(base).map_or_else(|| base.to_string(), str::to_string);
    match sub {
        Some(sub) => {
            let sub = greek_to_latex(sub).map_or_else(|| sub.to_string(), str::to_string);
            format!("{}_{{{}}}{}", base, sub, primes)
        }
        None => format!("{}{}", base, primes),
    }
}

fn latex_number(val: f64) -> String {
    if val.fract() == 0.0 && val.abs() < 1e15 {
        format!("{:.0}", val)
    } else {
        format!("{}", val)
    }
}

/// Binding strength used to decide on parentheses
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => 1,
        Expr::Mul(_, _) => 2,
        Expr::Const(val) if *val < 0.0 => 2,
        // \frac groups itself, only a power base needs parentheses around it
        Expr::Div(_, _) | Expr::Pow(_, _) => 3,
        _ => 4,
    }
}

fn wrap(expr: &Expr, min_precedence: u8) -> String {
    let inner = expr.to_latex();
    if precedence(expr) < min_precedence {
        format!(r"\left({}\right)", inner)
    } else {
        inner
    }
}

impl Expr {
    /// Convert the expression to LaTeX format.
    ///
    /// Returns a string suitable for rendering in LaTeX math environments.
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Var(name) => latex_symbol(name),
            Expr::Const(val) => latex_number(*val),
            Expr::Add(lhs, rhs) => match rhs.as_ref() {
                // a + (-1 * b) reads as a - b
                Expr::Mul(c, b) if matches!(c.as_ref(), Expr::Const(v) if *v == -1.0) => {
                    format!("{} - {}", lhs.to_latex(), wrap(b, 2))
                }
                _ => format!("{} + {}", lhs.to_latex(), rhs.to_latex()),
            },
            Expr::Sub(lhs, rhs) => format!("{} - {}", lhs.to_latex(), wrap(rhs, 2)),
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(c), _) if *c == -1.0 => format!("-{}", wrap(rhs, 3)),
                (_, Expr::Const(_)) => format!(r"{} \cdot {}", wrap(lhs, 2), wrap(rhs, 3)),
                _ => format!("{} {}", wrap(lhs, 2), wrap(rhs, 3)),
            },
            Expr::Div(lhs, rhs) => format!(r"\frac{{{}}}{{{}}}", lhs.to_latex(), rhs.to_latex()),
            Expr::Pow(base, exp) => format!("{}^{{{}}}", wrap(base, 4), exp.to_latex()),
            Expr::Exp(expr) => format!("e^{{{}}}", expr.to_latex()),
            Expr::Func { name, sup, args } => {
                let mut out = latex_symbol(name);
                if let Some(sup) = sup {
                    out.push_str(&format!("^{{({})}}", sup.to_latex()));
                }
                let all_symbols = args.iter().all(|a| matches!(a, Expr::Var(_)));
                // a field such as phi() renders as the bare symbol
                if args.is_empty() {
                    return out;
                }
                if all_symbols {
                    let indices: String = args.iter().map(|a| a.to_latex()).collect();
                    out.push_str(&format!("_{{{}}}", indices));
                } else {
                    let inner: Vec<String> = args.iter().map(|a| a.to_latex()).collect();
                    out.push_str(&format!(r"\left({}\right)", inner.join(", ")));
                }
                out
            }
            Expr::Derivative(expr, var) => {
                format!(r"\partial_{{{}}} {}", var.to_latex(), wrap(expr, 4))
            }
        }
    }
}
