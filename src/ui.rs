use crate::models::SummaryResponse;

pub fn render_index(summary: &SummaryResponse) -> String {
    let (upcoming_name, upcoming_price, upcoming_due) = match &summary.upcoming {
        Some(upcoming) => (
            upcoming.name.clone(),
            format!("{:.2} {}", upcoming.price, upcoming.currency),
            due_text(upcoming.days_until),
        ),
        None => (
            "\u{2014}".to_string(),
            String::new(),
            "No upcoming payments".to_string(),
        ),
    };

    INDEX_HTML
        .replace("{{TOTAL}}", &format!("{:.2}", summary.monthly_total))
        .replace("{{COUNT}}", &summary.subscription_count.to_string())
        .replace("{{UPCOMING_NAME}}", &upcoming_name)
        .replace("{{UPCOMING_PRICE}}", &upcoming_price)
        .replace("{{UPCOMING_DUE}}", &upcoming_due)
}

fn due_text(days_until: i64) -> String {
    match days_until {
        0 => "Due today".to_string(),
        1 => "Due in 1 day".to_string(),
        days => format!("Due in {days} days"),
    }
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>SubTrack</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef1fb;
      --bg-2: #dfe5fa;
      --ink: #1f2333;
      --muted: #6b7089;
      --accent: #6366f1;
      --accent-soft: rgba(99, 102, 241, 0.14);
      --danger: #ef4444;
      --ok: #10b981;
      --card: rgba(255, 255, 255, 0.92);
      --line: rgba(31, 35, 51, 0.1);
      --shadow: 0 24px 60px rgba(48, 52, 94, 0.16);
    }

    body.dark {
      --bg-1: #161926;
      --bg-2: #1e2336;
      --ink: #e8eaf6;
      --muted: #9aa0bd;
      --accent-soft: rgba(99, 102, 241, 0.26);
      --card: rgba(30, 34, 53, 0.94);
      --line: rgba(232, 234, 246, 0.12);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.45);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 28px 18px 48px;
      display: flex;
      justify-content: center;
      transition: background 250ms ease, color 250ms ease;
    }

    .app {
      width: min(1080px, 100%);
      display: grid;
      gap: 22px;
    }

    .navbar {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .navbar h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: 1.7rem;
      margin: 0;
    }

    .navbar h1 span {
      color: var(--accent);
    }

    .nav-actions {
      display: flex;
      gap: 10px;
    }

    .icon-btn {
      appearance: none;
      border: 1px solid var(--line);
      background: var(--card);
      color: var(--ink);
      border-radius: 999px;
      padding: 9px 16px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease;
    }

    .icon-btn:active {
      transform: scale(0.97);
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(12px);
      border: 1px solid var(--line);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 22px;
    }

    .stats-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .stat-card .label {
      margin: 0 0 8px;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat-card .value {
      margin: 0;
      font-size: 1.7rem;
      font-weight: 600;
    }

    .stat-card .value.highlight {
      color: var(--accent);
    }

    .stat-card .subtext {
      margin: 6px 0 0;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .content-split {
      display: grid;
      grid-template-columns: minmax(0, 3fr) minmax(0, 2fr);
      gap: 22px;
      align-items: start;
    }

    .column {
      display: grid;
      gap: 22px;
    }

    .card-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
      margin-bottom: 14px;
    }

    .card-header h3 {
      margin: 0;
      font-size: 1.1rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 10px 8px;
      border-bottom: 1px solid var(--line);
    }

    th {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    td.cost {
      text-align: right;
      font-weight: 600;
      white-space: nowrap;
    }

    .badge {
      display: inline-block;
      background: var(--accent-soft);
      color: var(--accent);
      border-radius: 999px;
      padding: 3px 10px;
      font-size: 0.78rem;
      font-weight: 600;
    }

    .btn-delete {
      appearance: none;
      border: none;
      background: transparent;
      color: var(--danger);
      font-size: 0.85rem;
      font-weight: 600;
      cursor: pointer;
      padding: 4px 8px;
      border-radius: 8px;
    }

    .btn-delete:hover {
      background: rgba(239, 68, 68, 0.12);
    }

    .add-form {
      display: grid;
      gap: 10px;
    }

    .add-form input,
    .add-form select {
      width: 100%;
      border: 1px solid var(--line);
      border-radius: 12px;
      background: transparent;
      color: var(--ink);
      padding: 10px 12px;
      font-size: 0.95rem;
      font-family: inherit;
    }

    .btn-primary {
      appearance: none;
      border: none;
      border-radius: 12px;
      background: var(--accent);
      color: white;
      padding: 12px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
    }

    .error-message {
      display: none;
      background: rgba(239, 68, 68, 0.12);
      color: var(--danger);
      border-radius: 10px;
      padding: 9px 12px;
      font-size: 0.88rem;
    }

    .error-message.visible {
      display: block;
    }

    .calendar-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 12px;
    }

    .calendar-header h4 {
      margin: 0;
      font-size: 1.05rem;
    }

    .calendar-nav-btn {
      appearance: none;
      border: 1px solid var(--line);
      background: transparent;
      color: var(--ink);
      border-radius: 10px;
      width: 34px;
      height: 34px;
      font-size: 1rem;
      cursor: pointer;
    }

    .calendar-weekdays,
    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 5px;
    }

    .weekday {
      text-align: center;
      font-size: 0.72rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--muted);
      padding: 4px 0;
    }

    .calendar-day {
      position: relative;
      min-height: 52px;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 5px 7px;
      font-size: 0.85rem;
    }

    .calendar-day.empty {
      border: none;
    }

    .calendar-day.today {
      border-color: var(--accent);
      background: var(--accent-soft);
    }

    .calendar-day.has-payment {
      border-color: var(--ok);
    }

    .payment-count {
      position: absolute;
      top: 5px;
      right: 6px;
      background: var(--ok);
      color: white;
      border-radius: 999px;
      min-width: 17px;
      height: 17px;
      font-size: 0.68rem;
      font-weight: 600;
      display: flex;
      align-items: center;
      justify-content: center;
      padding: 0 4px;
    }

    .payment-tooltip {
      display: none;
      position: absolute;
      left: 50%;
      bottom: calc(100% + 6px);
      transform: translateX(-50%);
      background: var(--ink);
      color: var(--bg-1);
      border-radius: 10px;
      padding: 8px 10px;
      min-width: 150px;
      z-index: 10;
      font-size: 0.8rem;
    }

    .calendar-day:hover .payment-tooltip {
      display: block;
    }

    .payment-item {
      display: flex;
      justify-content: space-between;
      gap: 10px;
      padding: 2px 0;
    }

    .calendar-legend {
      display: flex;
      gap: 18px;
      margin-top: 12px;
      font-size: 0.82rem;
      color: var(--muted);
    }

    .legend-item {
      display: flex;
      align-items: center;
      gap: 7px;
    }

    .legend-swatch {
      width: 13px;
      height: 13px;
      border-radius: 4px;
    }

    .legend-swatch.today {
      background: var(--accent-soft);
      border: 1px solid var(--accent);
    }

    .legend-swatch.has-payment {
      border: 1px solid var(--ok);
    }

    .chart-wrapper {
      display: grid;
      gap: 14px;
      justify-items: center;
    }

    #chart {
      width: 100%;
      max-width: 260px;
      display: block;
    }

    .chart-legend {
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      gap: 10px 16px;
      font-size: 0.84rem;
    }

    .chart-legend .dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 999px;
      margin-right: 6px;
    }

    .hidden {
      display: none;
    }

    @media (max-width: 840px) {
      .content-split {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <nav class="navbar">
      <h1>Sub<span>Track</span></h1>
      <div class="nav-actions">
        <button class="icon-btn" id="view-toggle" type="button">Calendar view</button>
        <button class="icon-btn" id="theme-toggle" type="button">Dark mode</button>
      </div>
    </nav>

    <section class="stats-grid">
      <div class="card stat-card">
        <p class="label">Monthly spend</p>
        <h2 class="value highlight"><span id="total">{{TOTAL}}</span> PLN</h2>
        <p class="subtext">Sum of active subscriptions</p>
      </div>
      <div class="card stat-card">
        <p class="label">Subscriptions</p>
        <h2 class="value" id="count">{{COUNT}}</h2>
        <p class="subtext">Active services</p>
      </div>
      <div class="card stat-card">
        <p class="label">Upcoming payment</p>
        <h2 class="value" id="upcoming-name">{{UPCOMING_NAME}}</h2>
        <p class="subtext"><span id="upcoming-price">{{UPCOMING_PRICE}}</span> <span id="upcoming-due">{{UPCOMING_DUE}}</span></p>
      </div>
    </section>

    <div class="content-split">
      <div class="column">
        <div class="card" id="list-card">
          <div class="card-header">
            <h3>Your subscriptions</h3>
          </div>
          <table>
            <thead>
              <tr>
                <th>Service</th>
                <th>Category</th>
                <th>Date</th>
                <th style="text-align: right">Cost</th>
                <th></th>
              </tr>
            </thead>
            <tbody id="sub-rows"></tbody>
          </table>
        </div>

        <div class="card hidden" id="calendar-card">
          <div class="calendar-header">
            <button class="calendar-nav-btn" id="prev-month" type="button" title="Previous month">&lt;</button>
            <h4 id="calendar-title"></h4>
            <button class="calendar-nav-btn" id="next-month" type="button" title="Next month">&gt;</button>
          </div>
          <div class="calendar-weekdays" id="calendar-weekdays"></div>
          <div class="calendar-grid" id="calendar-grid"></div>
          <div class="calendar-legend">
            <div class="legend-item"><span class="legend-swatch today"></span>Today</div>
            <div class="legend-item"><span class="legend-swatch has-payment"></span>Payment due</div>
          </div>
        </div>

        <div class="card">
          <div class="card-header">
            <h3>Add a subscription</h3>
          </div>
          <form class="add-form" id="add-form">
            <div class="error-message" id="form-error"></div>
            <input type="text" id="new-name" placeholder="Name (e.g. HBO Max)" />
            <input type="number" id="new-price" placeholder="Price (PLN)" step="0.01" min="0.01" />
            <select id="new-category">
              <option>Entertainment</option>
              <option>Work</option>
              <option>Health</option>
              <option>Education</option>
              <option>Other</option>
            </select>
            <input type="date" id="new-date" />
            <button class="btn-primary" type="submit">Add to list</button>
          </form>
        </div>
      </div>

      <div class="column">
        <div class="card">
          <div class="card-header">
            <h3>Spending by category</h3>
          </div>
          <div class="chart-wrapper">
            <svg id="chart" viewBox="0 0 200 200" role="img" aria-label="Spending by category"></svg>
            <div class="chart-legend" id="chart-legend"></div>
          </div>
        </div>
      </div>
    </div>
  </main>

  <script>
    const COLORS = ['#6366f1', '#ec4899', '#10b981', '#f59e0b', '#8b5cf6'];

    const subRows = document.getElementById('sub-rows');
    const totalEl = document.getElementById('total');
    const countEl = document.getElementById('count');
    const upcomingNameEl = document.getElementById('upcoming-name');
    const upcomingPriceEl = document.getElementById('upcoming-price');
    const upcomingDueEl = document.getElementById('upcoming-due');
    const chartEl = document.getElementById('chart');
    const chartLegendEl = document.getElementById('chart-legend');
    const calendarTitle = document.getElementById('calendar-title');
    const calendarWeekdays = document.getElementById('calendar-weekdays');
    const calendarGrid = document.getElementById('calendar-grid');
    const formError = document.getElementById('form-error');
    const listCard = document.getElementById('list-card');
    const calendarCard = document.getElementById('calendar-card');
    const viewToggle = document.getElementById('view-toggle');
    const themeToggle = document.getElementById('theme-toggle');

    let calendarView = false;

    const esc = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      }[ch]));

    const showError = (message) => {
      formError.textContent = message || '';
      formError.classList.toggle('visible', Boolean(message));
    };

    const renderSubscriptions = (subs) => {
      subRows.innerHTML = subs
        .map(
          (sub) => `
        <tr>
          <td><strong>${esc(sub.name)}</strong></td>
          <td><span class="badge">${esc(sub.category)}</span></td>
          <td>${esc(sub.next_payment)}</td>
          <td class="cost">${sub.price.toFixed(2)} ${esc(sub.currency)}</td>
          <td style="text-align: center">
            <button class="btn-delete" type="button" data-id="${sub.id}">Delete</button>
          </td>
        </tr>`
        )
        .join('');
    };

    const renderSummary = (summary) => {
      totalEl.textContent = summary.monthly_total.toFixed(2);
      countEl.textContent = summary.subscription_count;
      if (summary.upcoming) {
        upcomingNameEl.textContent = summary.upcoming.name;
        upcomingPriceEl.textContent =
          summary.upcoming.price.toFixed(2) + ' ' + summary.upcoming.currency;
        upcomingDueEl.textContent =
          summary.upcoming.days_until === 0
            ? 'Due today'
            : summary.upcoming.days_until === 1
              ? 'Due in 1 day'
              : 'Due in ' + summary.upcoming.days_until + ' days';
      } else {
        upcomingNameEl.textContent = '—';
        upcomingPriceEl.textContent = '';
        upcomingDueEl.textContent = 'No upcoming payments';
      }
      renderChart(summary.chart);
    };

    const polar = (cx, cy, radius, angle) => [
      cx + radius * Math.cos(angle),
      cy + radius * Math.sin(angle)
    ];

    const donutSlice = (cx, cy, outer, inner, start, end) => {
      const large = end - start > Math.PI ? 1 : 0;
      const [x1, y1] = polar(cx, cy, outer, start);
      const [x2, y2] = polar(cx, cy, outer, end);
      const [x3, y3] = polar(cx, cy, inner, end);
      const [x4, y4] = polar(cx, cy, inner, start);
      return [
        `M ${x1.toFixed(2)} ${y1.toFixed(2)}`,
        `A ${outer} ${outer} 0 ${large} 1 ${x2.toFixed(2)} ${y2.toFixed(2)}`,
        `L ${x3.toFixed(2)} ${y3.toFixed(2)}`,
        `A ${inner} ${inner} 0 ${large} 0 ${x4.toFixed(2)} ${y4.toFixed(2)}`,
        'Z'
      ].join(' ');
    };

    const renderChart = (slices) => {
      const total = slices.reduce((acc, slice) => acc + slice.value, 0);
      if (!slices.length || total <= 0) {
        chartEl.innerHTML =
          '<text x="100" y="104" text-anchor="middle" fill="currentColor" font-size="12">No data yet</text>';
        chartLegendEl.innerHTML = '';
        return;
      }

      const gap = slices.length > 1 ? 0.04 : 0;
      let angle = -Math.PI / 2;
      const paths = slices
        .map((slice, index) => {
          const sweep = (slice.value / total) * Math.PI * 2;
          const start = angle + gap / 2;
          const end = Math.max(start, angle + sweep - gap / 2);
          angle += sweep;
          const capped = Math.min(end, start + Math.PI * 2 - 0.001);
          const d = donutSlice(100, 100, 80, 56, start, capped);
          return `<path d="${d}" fill="${COLORS[index % COLORS.length]}"></path>`;
        })
        .join('');
      chartEl.innerHTML = paths;

      chartLegendEl.innerHTML = slices
        .map(
          (slice, index) => `
        <span>
          <span class="dot" style="background: ${COLORS[index % COLORS.length]}"></span>
          ${esc(slice.name)} (${slice.value.toFixed(2)})
        </span>`
        )
        .join('');
    };

    const renderCalendar = (data) => {
      calendarTitle.textContent = data.label;
      calendarWeekdays.innerHTML = data.weekdays
        .map((day) => `<div class="weekday">${day}</div>`)
        .join('');
      calendarGrid.innerHTML = data.cells
        .map((cell) => {
          if (cell.day === null) {
            return '<div class="calendar-day empty"></div>';
          }
          const classes = ['calendar-day'];
          if (cell.is_today) classes.push('today');
          if (cell.has_payment) classes.push('has-payment');
          const badge = cell.has_payment
            ? `<span class="payment-count">${cell.payment_count}</span>`
            : '';
          const tooltip = cell.has_payment
            ? `<div class="payment-tooltip">${cell.payments
                .map(
                  (sub) => `
                <div class="payment-item">
                  <strong>${esc(sub.name)}</strong>
                  <span>${sub.price.toFixed(2)} ${esc(sub.currency)}</span>
                </div>`
                )
                .join('')}</div>`
            : '';
          return `<div class="${classes.join(' ')}">${cell.day}${badge}${tooltip}</div>`;
        })
        .join('');
    };

    const loadSubscriptions = async () => {
      const res = await fetch('/api/subscriptions');
      if (!res.ok) throw new Error('Unable to load subscriptions');
      renderSubscriptions(await res.json());
    };

    const loadSummary = async () => {
      const res = await fetch('/api/summary');
      if (!res.ok) throw new Error('Unable to load summary');
      renderSummary(await res.json());
    };

    const loadCalendar = async () => {
      const res = await fetch('/api/calendar');
      if (!res.ok) throw new Error('Unable to load calendar');
      renderCalendar(await res.json());
    };

    const refresh = () =>
      Promise.all([loadSubscriptions(), loadSummary(), loadCalendar()]);

    const navigate = async (direction) => {
      const res = await fetch('/api/calendar/navigate', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ direction })
      });
      if (!res.ok) throw new Error('Navigation failed');
      renderCalendar(await res.json());
    };

    document.getElementById('add-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const payload = {
        name: document.getElementById('new-name').value,
        price: document.getElementById('new-price').value,
        category: document.getElementById('new-category').value,
        next_payment: document.getElementById('new-date').value
      };
      const res = await fetch('/api/subscriptions', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (!res.ok) {
        showError(await res.text());
        return;
      }
      showError('');
      document.getElementById('new-name').value = '';
      document.getElementById('new-price').value = '';
      document.getElementById('new-date').value = '';
      refresh().catch(() => {});
    });

    subRows.addEventListener('click', async (event) => {
      const button = event.target.closest('.btn-delete');
      if (!button) return;
      const res = await fetch('/api/subscriptions/delete', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ id: Number(button.dataset.id) })
      });
      if (res.ok) {
        renderSubscriptions(await res.json());
        Promise.all([loadSummary(), loadCalendar()]).catch(() => {});
      }
    });

    document.getElementById('prev-month').addEventListener('click', () => navigate(-1));
    document.getElementById('next-month').addEventListener('click', () => navigate(1));

    viewToggle.addEventListener('click', () => {
      calendarView = !calendarView;
      listCard.classList.toggle('hidden', calendarView);
      calendarCard.classList.toggle('hidden', !calendarView);
      viewToggle.textContent = calendarView ? 'List view' : 'Calendar view';
    });

    themeToggle.addEventListener('click', () => {
      const dark = document.body.classList.toggle('dark');
      themeToggle.textContent = dark ? 'Light mode' : 'Dark mode';
    });

    refresh().catch(() => {});
  </script>
</body>
</html>
"##;
