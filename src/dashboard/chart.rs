//! The monthly revenue bar chart and its y-axis labels.

use maud::{Markup, html};

use crate::Error;

use super::revenue::Revenue;

/// The step between y-axis labels in whole dollars.
const Y_AXIS_STEP: i64 = 1000;

/// The height of the chart's plot area in pixels.
const CHART_HEIGHT_PX: i64 = 350;

/// The y-axis of the revenue chart: label strings from the top bound down
/// to zero, and the top bound itself for scaling the bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct YAxis {
    /// Labels in descending order, e.g. `["$5K", ..., "$0K"]`.
    pub labels: Vec<String>,
    /// The highest revenue rounded up to the nearest thousand dollars.
    pub top: i64,
}

/// Calculate the y-axis labels for a revenue chart.
///
/// The top bound is the highest revenue rounded up to the nearest thousand;
/// one `"$NK"` label is emitted per thousand-dollar step from the top bound
/// down to and including zero, so consumers can render the axis
/// top-to-bottom.
///
/// # Errors
/// Returns [Error::EmptyRevenueData] if `revenue` is empty.
pub(super) fn generate_y_axis(revenue: &[Revenue]) -> Result<YAxis, Error> {
    let highest = revenue
        .iter()
        .map(|record| record.revenue)
        .max()
        .ok_or(Error::EmptyRevenueData)?;

    let top = (highest + Y_AXIS_STEP - 1) / Y_AXIS_STEP * Y_AXIS_STEP;
    let labels = (0..=top / Y_AXIS_STEP)
        .rev()
        .map(|step| format!("${step}K"))
        .collect();

    Ok(YAxis { labels, top })
}

/// Render the revenue chart: a column of y-axis labels next to one scaled
/// bar per month.
pub(super) fn revenue_chart_view(revenue: &[Revenue], y_axis: &YAxis) -> Markup {
    let bar_height = |amount: i64| {
        if y_axis.top == 0 {
            return 0;
        }

        CHART_HEIGHT_PX * amount / y_axis.top
    };

    html!(
        section class="w-full mx-auto mb-4"
        {
            h2 class="mb-4 text-xl font-semibold" { "Recent Revenue" }

            div class="rounded bg-white p-4 dark:bg-gray-800"
            {
                div class="grid grid-cols-13 items-end gap-2"
                {
                    div
                        class="mb-6 flex flex-col justify-between text-sm text-gray-400"
                        style=(format!("height: {CHART_HEIGHT_PX}px"))
                    {
                        @for label in &y_axis.labels {
                            p { (label) }
                        }
                    }

                    @for record in revenue {
                        div class="flex flex-col items-center gap-2"
                        {
                            div
                                class="w-full rounded-md bg-blue-300"
                                style=(format!("height: {}px", bar_height(record.revenue)))
                            {}

                            p class="text-sm text-gray-400" { (record.month) }
                        }
                    }
                }
            }
        }
    )
}


#[cfg(test)]
mod revenue_chart_view_tests {
    use scraper::{Html, Selector};

    use super::{super::revenue::Revenue, generate_y_axis, revenue_chart_view};

    #[test]
    fn renders_one_bar_per_month() {
        let revenue = vec![
            Revenue {
                month: "Jan".to_owned(),
                revenue: 2000,
            },
            Revenue {
                month: "Feb".to_owned(),
                revenue: 1800,
            },
        ];
        let y_axis = generate_y_axis(&revenue).unwrap();

        let markup = revenue_chart_view(&revenue, &y_axis);

        let html = Html::parse_fragment(&markup.into_string());
        let month_label = Selector::parse("p.text-sm").unwrap();
        let months: Vec<String> = html
            .select(&month_label)
            .map(|element| element.text().collect())
            .collect();

        assert_eq!(months, ["Jan", "Feb"]);
    }

    #[test]
    fn scales_bars_against_the_top_bound() {
        let revenue = vec![Revenue {
            month: "Jan".to_owned(),
            revenue: 2000,
        }];
        let y_axis = generate_y_axis(&revenue).unwrap();

        let markup = revenue_chart_view(&revenue, &y_axis).into_string();

        // 350px * 2000 / 2000
        assert!(markup.contains("height: 350px"), "{markup}");
    }
}
