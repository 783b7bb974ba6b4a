//! Self-contained HTML rendering of a scan report.

use crate::report::ScanReport;

pub fn render(report: &ScanReport) -> String {
    let summary = report.summary();
    let count = report.count_by_severity();

    let mut cards = String::new();
    for (index, finding) in report.ranked().iter().enumerate() {
        cards.push_str(&format!(
            r#"        <div class="finding" style="border-left: 6px solid {color};">
            <div class="finding-header">
                <span class="badge" style="background: {color};">{severity}</span>
                <h3>#{number} {function}: variable <code>{variable}</code></h3>
            </div>
            <p class="location">{file}: None assigned at line {null_line}, dereferenced at line {use_line}</p>
            <p><strong>Trigger condition:</strong> {trigger}</p>
            <p><strong>Path:</strong> {path}</p>
            <p><strong>Rationale:</strong> {rationale}</p>
            <pre><code>{snippet}</code></pre>
        </div>
"#,
            color = finding.severity.html_color(),
            severity = finding.severity,
            number = index + 1,
            function = escape(&finding.function),
            variable = escape(&finding.variable),
            file = escape(&finding.file),
            null_line = finding.null_line,
            use_line = finding.use_line,
            trigger = escape(or_dash(&finding.trigger_condition)),
            path = escape(or_dash(&finding.path_description)),
            rationale = escape(or_dash(&finding.rationale)),
            snippet = escape(&finding.snippet),
        ));
    }

    if cards.is_empty() {
        cards.push_str(
            "        <div class=\"empty\">No confirmed null dereference flows were found.</div>\n",
        );
    }

    let mut skipped = String::new();
    if !report.skipped().is_empty() {
        skipped.push_str("        <div class=\"skipped\"><h2>Skipped files</h2><ul>\n");
        for skip in report.skipped() {
            skipped.push_str(&format!(
                "            <li><code>{}</code>: {}</li>\n",
                escape(&skip.path),
                escape(&skip.reason)
            ));
        }
        skipped.push_str("        </ul></div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Null Dereference Report - nullaudit</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
            background: #f7fafc;
            padding: 24px;
            line-height: 1.6;
            color: #2d3748;
        }}
        .container {{ max-width: 1100px; margin: 0 auto; }}
        .header {{
            background: white; padding: 32px; border-radius: 12px;
            margin-bottom: 24px; box-shadow: 0 4px 16px rgba(0,0,0,0.06);
        }}
        .header h1 {{ font-size: 28px; margin-bottom: 6px; }}
        .header .subtitle {{ color: #718096; }}
        .stats {{ display: flex; gap: 16px; margin-top: 20px; flex-wrap: wrap; }}
        .stat {{
            background: #edf2f7; padding: 12px 20px; border-radius: 8px;
            font-size: 14px;
        }}
        .stat .value {{ font-size: 22px; font-weight: 700; display: block; }}
        .finding {{
            background: white; padding: 24px; border-radius: 10px;
            margin-bottom: 18px; box-shadow: 0 2px 8px rgba(0,0,0,0.05);
        }}
        .finding-header {{ display: flex; align-items: center; gap: 12px; margin-bottom: 10px; }}
        .finding h3 {{ font-size: 18px; }}
        .badge {{
            color: white; padding: 3px 12px; border-radius: 999px;
            font-size: 12px; font-weight: 700; text-transform: uppercase;
        }}
        .location {{ color: #718096; font-size: 14px; margin-bottom: 10px; }}
        pre {{
            background: #1a202c; color: #e2e8f0; padding: 16px;
            border-radius: 8px; overflow-x: auto; margin-top: 12px; font-size: 13px;
        }}
        .empty {{
            background: white; padding: 40px; border-radius: 10px;
            text-align: center; color: #38a169; font-size: 18px;
        }}
        .skipped {{
            background: #fffaf0; padding: 20px 24px; border-radius: 10px;
            margin-bottom: 18px; border-left: 6px solid #dd6b20;
        }}
        .skipped h2 {{ font-size: 16px; margin-bottom: 8px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Null Dereference Report</h1>
            <p class="subtitle">Generated by nullaudit — candidate flows verified by an LLM path analysis</p>
            <div class="stats">
                <div class="stat"><span class="value">{total}</span>total findings</div>
                <div class="stat"><span class="value">{files}</span>files affected</div>
                <div class="stat"><span class="value">{critical}</span>critical</div>
                <div class="stat"><span class="value">{high}</span>high</div>
                <div class="stat"><span class="value">{medium}</span>medium</div>
                <div class="stat"><span class="value">{low}</span>low</div>
            </div>
        </div>
{skipped}{cards}    </div>
</body>
</html>
"#,
        total = summary.total,
        files = summary.files_affected,
        critical = count.critical,
        high = count.high,
        medium = count.medium,
        low = count.low,
        skipped = skipped,
        cards = cards,
    )
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
